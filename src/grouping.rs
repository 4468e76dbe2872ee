use std::collections::BTreeMap;

use crate::catalog::{EditorResolver, KnownInstrumentCatalog};
use crate::error::CatalogError;
use crate::models::EditorGroup;

/// Buckets detected labels by resolved editor.
///
/// Groups come out sorted by editor name and labels within a group are sorted.
/// `"Unknown"` is ordered like any other editor. Duplicate labels are kept.
pub fn group_with_resolver<I, S>(names: I, resolver: &EditorResolver<'_>) -> Vec<EditorGroup>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut buckets: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for name in names {
        let name = name.as_ref();
        buckets
            .entry(resolver.resolve(name).to_string())
            .or_default()
            .push(name.to_string());
    }

    buckets
        .into_iter()
        .map(|(editor, mut names)| {
            names.sort();
            EditorGroup { editor, names }
        })
        .collect()
}

/// Groups `names` by the editors recorded in `catalog`.
pub fn group_by_editor<I, S>(
    names: I,
    catalog: &KnownInstrumentCatalog,
) -> Result<Vec<EditorGroup>, CatalogError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let resolver = catalog.resolver()?;
    Ok(group_with_resolver(names, &resolver))
}

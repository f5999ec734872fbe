//! Field specifications.
//!
//! A [`Schema`] says which record fields the pipeline may filter or search on,
//! and how. It is the single source of truth for facet computation: only
//! fields declared filterable here get a facet.

pub const DEFAULT_WILDCARD: &str = "all";

/// How a field participates in filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// One value selected at a time (e.g. `category`, `author`).
    ///
    /// Facets for these fields get the wildcard prepended.
    SingleSelect,

    /// Any number of values selected, OR-combined (e.g. `tags`).
    MultiSelect,

    /// Not filterable; may still be searchable (e.g. `title`).
    Text,
}

/// Specification for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// The field name as it appears in [`crate::model::Record::fields`]
    pub name: String,

    /// How the field is filtered
    pub kind: FieldKind,

    /// Whether free-text search looks at this field
    pub searchable: bool,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            searchable: false,
        }
    }

    pub fn single_select(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::SingleSelect)
    }

    pub fn multi_select(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::MultiSelect)
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    /// Set the searchable flag.
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn is_filterable(&self) -> bool {
        !matches!(self.kind, FieldKind::Text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
    wildcard: String,
}

impl Default for Schema {
    /// The blog-post shape: title/content searchable, category/author single
    /// select, tags multi select.
    fn default() -> Self {
        Self::new(vec![
            FieldSpec::text("title").searchable(),
            FieldSpec::text("content").searchable(),
            FieldSpec::single_select("category"),
            FieldSpec::single_select("author"),
            FieldSpec::multi_select("tags"),
        ])
    }
}

impl Schema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self {
            fields,
            wildcard: DEFAULT_WILDCARD.to_string(),
        }
    }

    pub fn with_wildcard(mut self, wildcard: impl Into<String>) -> Self {
        self.wildcard = wildcard.into();
        self
    }

    /// Add a field, or merge flags into an existing one of the same name.
    ///
    /// A filterable kind wins over `Text`; `searchable` is sticky.
    pub fn add(&mut self, spec: FieldSpec) {
        match self.fields.iter_mut().find(|f| f.name == spec.name) {
            Some(existing) => {
                if spec.is_filterable() {
                    existing.kind = spec.kind;
                }
                existing.searchable |= spec.searchable;
            }
            None => self.fields.push(spec),
        }
    }

    pub fn wildcard(&self) -> &str {
        &self.wildcard
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn filterable(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.is_filterable())
    }

    pub fn search_fields(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.searchable)
            .map(|f| f.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schema_is_blog_shaped() {
        let schema = Schema::default();

        assert_eq!(schema.search_fields(), vec!["title", "content"]);
        let filterable: Vec<_> = schema.filterable().map(|f| f.name.as_str()).collect();
        assert_eq!(filterable, vec!["category", "author", "tags"]);
        assert_eq!(schema.wildcard(), "all");
    }

    #[test]
    fn add_merges_existing_field() {
        let mut schema = Schema::new(vec![FieldSpec::text("title").searchable()]);
        schema.add(FieldSpec::single_select("title"));

        let title = schema.get("title").unwrap();
        assert_eq!(title.kind, FieldKind::SingleSelect);
        assert!(title.searchable);
        assert_eq!(schema.fields().len(), 1);
    }

    #[test]
    fn add_text_does_not_downgrade_filterable() {
        let mut schema = Schema::new(vec![FieldSpec::multi_select("tags")]);
        schema.add(FieldSpec::text("tags").searchable());

        let tags = schema.get("tags").unwrap();
        assert_eq!(tags.kind, FieldKind::MultiSelect);
        assert!(tags.searchable);
    }

    #[test]
    fn unknown_field_is_none() {
        assert!(Schema::default().get("nope").is_none());
    }
}

use std::fmt;
use std::path::PathBuf;

/// Where the raw schema text for one side of the comparison comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    File(PathBuf),
    Url(String),
    Endpoint(String),
}

impl SchemaSource {
    pub fn label(&self) -> &'static str {
        match self {
            SchemaSource::File(_) => "file",
            SchemaSource::Url(_) => "URL",
            SchemaSource::Endpoint(_) => "GraphQL endpoint",
        }
    }

    pub fn location(&self) -> String {
        match self {
            SchemaSource::File(path) => path.display().to_string(),
            SchemaSource::Url(url) | SchemaSource::Endpoint(url) => url.clone(),
        }
    }
}

impl fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.location(), self.label())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Pick the source for one side. File wins over URL, URL wins over GraphQL
/// endpoint; the remaining flags are ignored.
pub fn resolve_source(
    file: Option<&str>,
    url: Option<&str>,
    graphql: Option<&str>,
) -> Option<SchemaSource> {
    non_empty(file)
        .map(|f| SchemaSource::File(PathBuf::from(f)))
        .or_else(|| non_empty(url).map(|u| SchemaSource::Url(u.to_string())))
        .or_else(|| non_empty(graphql).map(|g| SchemaSource::Endpoint(g.to_string())))
}

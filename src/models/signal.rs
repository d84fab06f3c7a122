use serde::Deserialize;

/// One row of the uploaded signal file. Columns beyond these are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Signal {
    pub date: String,
    pub symbol: String,
    #[serde(default)]
    pub marketcapname: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
}

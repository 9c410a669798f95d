use serde::{Deserialize, Serialize};

/// One row of the labeled corpus.
#[derive(Deserialize, Debug)]
pub struct CorpusRecord {
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "Language")]
    pub language: String,
}

/// Body of an identification request.
#[derive(Deserialize, Serialize, Debug)]
pub struct PalabraInput {
    pub palabra: String,
}

/// Body of an identification response.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq)]
pub struct IdiomaOutput {
    pub idioma: String,
}

pub mod client;
pub mod error;
pub mod experiment;
pub mod id;
pub mod run;

// The server encodes int64 fields either as JSON numbers or as decimal strings.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Int64 {
    Number(i64),
    Text(String),
}

impl Int64 {
    fn into_i64<E: serde::de::Error>(self) -> Result<i64, E> {
        match self {
            Int64::Number(int) => Ok(int),
            Int64::Text(s) => s.parse().map_err(E::custom),
        }
    }
}

// deserialize i64 from number or str
mod int64 {
    use serde::de::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        super::Int64::deserialize(deserializer)?.into_i64()
    }
}

// deserialize Option<i64> from number, str or null
mod opt_int64 {
    use serde::de::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<super::Int64>::deserialize(deserializer)?
            .map(super::Int64::into_i64)
            .transpose()
    }
}

pub type SerdePathError = serde_path_to_error::Error<serde_json::Error>;

pub trait SerdeResponseParseAsync {
    type Error;

    fn serde_parse_custom<T>(
        self,
    ) -> impl std::future::Future<Output = Result<T, Self::Error>> + Send
    where
        T: serde::de::DeserializeOwned;
}

impl SerdeResponseParseAsync for &str {
    type Error = SerdePathError;

    async fn serde_parse_custom<T>(self) -> Result<T, SerdePathError>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_response_parse::<T>(self)
    }
}

/// Parses JSON keeping track of the path, so errors point at the offending field
/// (e.g. `data[3].Close`) instead of only a line and column.
pub fn serde_response_parse<T>(s: &str) -> Result<T, SerdePathError>
where
    T: serde::de::DeserializeOwned,
{
    serde_path_to_error::deserialize(&mut serde_json::Deserializer::from_str(s))
}

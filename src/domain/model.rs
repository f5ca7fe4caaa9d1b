use serde::{Deserialize, Deserializer, Serialize};

/// Identifier assigned by the REST sink to a forwarded post.
pub type PostId = i64;

/// Constant author id sent with every forwarded post.
pub const AUTHOR_USER_ID: u32 = 1;

pub const COUNTRIES_QUERY: &str = "query { countries { name capital currency } }";

pub const CSV_HEADER: [&str; 3] = ["Country Name", "Capital", "Currency"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub capital: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub currency: String,
}

impl Country {
    pub fn new(
        name: impl Into<String>,
        capital: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            capital: capital.into(),
            currency: currency.into(),
        }
    }
}

// 部分國家（例如南極洲）的 capital/currency 為 null
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<CountriesData>,
    #[serde(default)]
    pub errors: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountriesData {
    #[serde(default)]
    pub countries: Option<Vec<Country>>,
}

impl GraphQlResponse {
    pub fn into_countries(self) -> Vec<Country> {
        self.data.and_then(|d| d.countries).unwrap_or_default()
    }
}

/// Body posted to the REST sink for one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostPayload {
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: u32,
}

impl From<&Country> for PostPayload {
    fn from(country: &Country) -> Self {
        Self {
            title: format!("Country: {}", country.name),
            body: format!(
                "Capital: {}, Currency: {}",
                country.capital, country.currency
            ),
            user_id: AUTHOR_USER_ID,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostResponse {
    #[serde(default)]
    pub id: Option<PostId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_from_country() {
        let country = Country::new("Andorra", "Andorra la Vella", "EUR");
        let payload = PostPayload::from(&country);

        assert_eq!(payload.title, "Country: Andorra");
        assert_eq!(payload.body, "Capital: Andorra la Vella, Currency: EUR");

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Country: Andorra",
                "body": "Capital: Andorra la Vella, Currency: EUR",
                "userId": 1
            })
        );
    }

    #[test]
    fn test_graphql_response_with_null_fields() {
        let body = r#"{"data":{"countries":[
            {"name":"Antarctica","capital":null,"currency":null},
            {"name":"Chile","capital":"Santiago","currency":"CLF,CLP"}
        ]}}"#;

        let response: GraphQlResponse = serde_json::from_str(body).unwrap();
        let countries = response.into_countries();

        assert_eq!(countries.len(), 2);
        assert_eq!(countries[0], Country::new("Antarctica", "", ""));
        assert_eq!(countries[1].currency, "CLF,CLP");
    }

    #[test]
    fn test_graphql_response_missing_data_is_empty() {
        let response: GraphQlResponse = serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert!(response.into_countries().is_empty());

        let response: GraphQlResponse =
            serde_json::from_str(r#"{"errors":[{"message":"boom"}]}"#).unwrap();
        assert!(response.errors.is_some());
        assert!(response.into_countries().is_empty());
    }
}

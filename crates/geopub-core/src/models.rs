//! Domain types and GeoServer wire shapes.
//!
//! GeoServer's JSON encoding collapses lists in a few ways: a one-element list
//! becomes a bare string and an empty list becomes `""` or disappears. The
//! untagged enums here absorb that at decode time so callers only ever see a
//! `Vec`.

use serde::{Deserialize, Serialize};

/// A datastore as listed under a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataStore {
    pub name: String,
}

/// Body of `GET /workspaces/{ws}/datastores`.
#[derive(Deserialize, Debug)]
pub struct DataStoresResponse {
    #[serde(rename = "dataStores")]
    data_stores: DataStoreCollection,
}

#[derive(Deserialize, Debug)]
struct DataStoreCollection {
    #[serde(rename = "dataStore")]
    data_store: Vec<DataStore>,
}

impl DataStoresResponse {
    pub fn into_stores(self) -> Vec<DataStore> {
        self.data_stores.data_store
    }
}

/// Body of `GET .../featuretypes?list=available`.
///
/// # Examples
///
/// ```
/// use geopub_core::models::AvailableFeatureTypes;
///
/// let single: AvailableFeatureTypes =
///     serde_json::from_str(r#"{"list": {"string": "roads"}}"#).unwrap();
/// assert_eq!(single.into_names(), vec!["roads"]);
///
/// let none: AvailableFeatureTypes = serde_json::from_str(r#"{"list": {}}"#).unwrap();
/// assert!(none.into_names().is_empty());
/// ```
#[derive(Deserialize, Debug)]
pub struct AvailableFeatureTypes {
    list: AvailableList,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum AvailableList {
    Entries {
        #[serde(default)]
        string: Option<OneOrMany>,
    },
    // `{"list": ""}`
    Blank(#[allow(dead_code)] String),
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl AvailableFeatureTypes {
    /// Normalizes the three server shapes into a list of layer names.
    pub fn into_names(self) -> Vec<String> {
        match self.list {
            AvailableList::Entries {
                string: Some(OneOrMany::One(name)),
            } => vec![name],
            AvailableList::Entries {
                string: Some(OneOrMany::Many(names)),
            } => names,
            AvailableList::Entries { string: None } | AvailableList::Blank(_) => Vec::new(),
        }
    }
}

/// Feature type definition sent to GeoServer when publishing a layer.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureTypeDefinition {
    pub name: String,
    /// Backing table or view in the datastore.
    pub native_name: String,
    pub title: String,
    pub enabled: bool,
}

impl FeatureTypeDefinition {
    /// Builds an enabled definition. `native_name` defaults to `name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use geopub_core::models::FeatureTypeDefinition;
    ///
    /// let def = FeatureTypeDefinition::new("arvo_kaapakohteet", "Valuable conks", None);
    /// assert_eq!(def.native_name, "arvo_kaapakohteet");
    /// assert!(def.enabled);
    /// ```
    pub fn new(name: &str, title: &str, native_name: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            native_name: native_name.unwrap_or(name).to_string(),
            title: title.to_string(),
            enabled: true,
        }
    }

    /// Serializes the definition inside the `{"featureType": ...}` envelope.
    pub fn to_request_body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&FeatureTypeEnvelope { feature_type: self })
    }
}

#[derive(Serialize)]
struct FeatureTypeEnvelope<'a> {
    #[serde(rename = "featureType")]
    feature_type: &'a FeatureTypeDefinition,
}

/// What the publish call hands back: the raw status and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResponse {
    pub status: u16,
    pub body: String,
}

impl PublishResponse {
    /// GeoServer answers a successful feature type creation with 201.
    pub fn is_created(&self) -> bool {
        self.status == 201
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_stores_deserialization() {
        let body = r#"{
            "dataStores": {
                "dataStore": [
                    {"name": "pg_main", "href": "https://h/geoserver/rest/workspaces/ltj-dev/datastores/pg_main.json"},
                    {"name": "pg_archive", "href": "https://h/geoserver/rest/workspaces/ltj-dev/datastores/pg_archive.json"}
                ]
            }
        }"#;

        let resp: DataStoresResponse = serde_json::from_str(body).unwrap();
        let names: Vec<_> = resp.into_stores().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["pg_main", "pg_archive"]);
    }

    #[test]
    fn test_data_stores_empty_workspace_is_shape_error() {
        let result = serde_json::from_str::<DataStoresResponse>(r#"{"dataStores": ""}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_available_single_string() {
        let resp: AvailableFeatureTypes =
            serde_json::from_str(r#"{"list": {"string": "arvo_kaapakohteet"}}"#).unwrap();
        assert_eq!(resp.into_names(), vec!["arvo_kaapakohteet"]);
    }

    #[test]
    fn test_available_list_kept_in_order() {
        let resp: AvailableFeatureTypes = serde_json::from_str(
            r#"{"list": {"string": ["arvo_kaapakohteet", "unmapped_layer", "a_last"]}}"#,
        )
        .unwrap();
        assert_eq!(
            resp.into_names(),
            vec!["arvo_kaapakohteet", "unmapped_layer", "a_last"]
        );
    }

    #[test]
    fn test_available_missing_string_key() {
        let resp: AvailableFeatureTypes = serde_json::from_str(r#"{"list": {}}"#).unwrap();
        assert!(resp.into_names().is_empty());
    }

    #[test]
    fn test_available_blank_list() {
        let resp: AvailableFeatureTypes = serde_json::from_str(r#"{"list": ""}"#).unwrap();
        assert!(resp.into_names().is_empty());
    }

    #[test]
    fn test_available_without_list_is_error() {
        assert!(serde_json::from_str::<AvailableFeatureTypes>(r#"{"other": 1}"#).is_err());
    }

    #[test]
    fn test_feature_type_native_name_override() {
        let def = FeatureTypeDefinition::new("roads", "Roads", Some("v_roads_2024"));
        assert_eq!(def.name, "roads");
        assert_eq!(def.native_name, "v_roads_2024");
    }

    #[test]
    fn test_feature_type_request_body() {
        let def = FeatureTypeDefinition::new("arvo_kaapakohteet", "Valuable conks", None);
        let body: serde_json::Value =
            serde_json::from_str(&def.to_request_body().unwrap()).unwrap();

        assert_eq!(
            body,
            json!({
                "featureType": {
                    "name": "arvo_kaapakohteet",
                    "nativeName": "arvo_kaapakohteet",
                    "title": "Valuable conks",
                    "enabled": true
                }
            })
        );
    }

    #[test]
    fn test_publish_response_is_created() {
        let created = PublishResponse {
            status: 201,
            body: "arvo_kaapakohteet".to_string(),
        };
        let ok_but_not_created = PublishResponse {
            status: 200,
            body: String::new(),
        };
        let conflict = PublishResponse {
            status: 500,
            body: "Resource named 'x' already exists".to_string(),
        };

        assert!(created.is_created());
        assert!(!ok_but_not_created.is_created());
        assert!(!conflict.is_created());
    }
}

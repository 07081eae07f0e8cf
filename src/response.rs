use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Params is the object form of the arguments passed to resource operations.
pub type Params = Map<String, Value>;

/// Pagination block found under `meta.pagination`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<u64>,
    /// Ghost reports `"all"` when no limit applies, hence a raw value
    #[serde(default)]
    pub limit: Option<Value>,
    #[serde(default)]
    pub pages: Option<u64>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub next: Option<u64>,
    #[serde(default)]
    pub prev: Option<u64>,
}

/// Response wraps a decoded Ghost API body.
///
/// Ghost returns the data under a key named after the resource (`posts`,
/// `tags`, `settings`, ...) next to an optional `meta` object. The data key is
/// not known up front: it is the first top-level key other than `meta`, in the
/// order the server sent them.
/// Items are kept in the order the server returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    raw: Map<String, Value>,
}

impl Response {
    pub fn new(raw: Map<String, Value>) -> Self {
        Response { raw }
    }

    /// Wrap any JSON value; non-objects produce an empty response
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(raw) => Response { raw },
            _ => Response::default(),
        }
    }

    /// The complete decoded body
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// Name of the data key, e.g. `"posts"`
    pub fn resource_key(&self) -> Option<&str> {
        self.raw.keys().find(|k| *k != "meta").map(String::as_str)
    }

    /// Value under the data key, whatever its shape.
    ///
    /// Single-object resources such as `settings` return an object here,
    /// for which [`Response::items`] is empty.
    pub fn data(&self) -> Option<&Value> {
        self.raw.get(self.resource_key()?)
    }

    /// Items under the data key, empty when there is none or it is not an array
    pub fn items(&self) -> &[Value] {
        self.data()
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn first(&self) -> Option<&Value> {
        self.items().first()
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items().iter()
    }

    pub fn meta(&self) -> Option<&Value> {
        self.raw.get("meta")
    }

    /// `meta.pagination`, as returned
    pub fn pagination(&self) -> Option<&Value> {
        self.meta()?.get("pagination")
    }

    /// `meta.pagination`, decoded
    pub fn pagination_info(&self) -> Option<Pagination> {
        serde_json::from_value(self.pagination()?.clone()).ok()
    }

    /// Deserialize the items into a caller-defined type
    pub fn items_as<T>(&self) -> Result<Vec<T>, crate::error::GhostError>
    where
        T: serde::de::DeserializeOwned,
    {
        self.items()
            .iter()
            .map(|item| T::deserialize(item).map_err(Into::into))
            .collect()
    }

    /// Get a value from the first item by a slash-separated path.
    /// For example, "authors/0/name" reads the first author's name.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current = self.first()?;

        for part in path.split('/').filter(|s| !s.is_empty()) {
            current = match current {
                Value::Object(map) => map.get(part)?,
                Value::Array(arr) => arr.get(part.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }

        Some(current)
    }

    /// Get a string value from the first item by a slash-separated path
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get(path).and_then(|v| v.as_str().map(|s| s.to_string()))
    }
}

impl<'a> IntoIterator for &'a Response {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_items_first_and_pagination() {
        let response = Response::from_value(json!({
            "posts": [{"id": "1"}],
            "meta": {"pagination": {"total": 1}}
        }));

        assert_eq!(response.len(), 1);
        assert_eq!(response.first(), Some(&json!({"id": "1"})));
        assert_eq!(response.pagination().unwrap()["total"], 1);
        assert_eq!(response.pagination_info().unwrap().total, Some(1));
        assert_eq!(response.resource_key(), Some("posts"));
    }

    #[test]
    fn test_data_key_follows_server_order() {
        let body = r#"{"posts":[{"id":"1"}],"aux":{"x":1},"meta":{}}"#;
        let response = Response::from_value(serde_json::from_str(body).unwrap());

        assert_eq!(response.resource_key(), Some("posts"));
        assert_eq!(response.len(), 1);
        assert_eq!(response.get_string("id"), Some("1".to_string()));
    }

    #[test]
    fn test_object_data_is_exposed() {
        let body = r#"{"settings":{"title":"Demo","lang":"en"},"meta":{}}"#;
        let response = Response::from_value(serde_json::from_str(body).unwrap());

        assert!(response.is_empty());
        assert_eq!(response.resource_key(), Some("settings"));
        assert_eq!(response.data().unwrap()["title"], "Demo");
    }

    #[test]
    fn test_meta_only() {
        let response = Response::from_value(json!({"meta": {}}));
        assert!(response.is_empty());
        assert!(response.first().is_none());
        assert!(response.pagination().is_none());
        assert!(response.resource_key().is_none());
    }

    #[test]
    fn test_empty_and_non_object_bodies() {
        assert!(Response::from_value(json!({})).is_empty());
        assert!(Response::from_value(json!([1, 2])).is_empty());
        assert!(Response::from_value(json!({"posts": "oops"})).is_empty());
    }

    #[test]
    fn test_iteration_preserves_order() {
        let response = Response::from_value(json!({
            "meta": {"pagination": {"page": 1, "limit": "all", "pages": 1, "total": 3}},
            "tags": [{"slug": "c"}, {"slug": "a"}, {"slug": "b"}]
        }));

        let slugs: Vec<&str> = response
            .into_iter()
            .map(|t| t["slug"].as_str().unwrap())
            .collect();
        assert_eq!(slugs, ["c", "a", "b"]);

        let pagination = response.pagination_info().unwrap();
        assert_eq!(pagination.limit, Some(json!("all")));
        assert_eq!(pagination.pages, Some(1));
        assert_eq!(pagination.next, None);
    }

    #[test]
    fn test_items_as() {
        #[derive(Deserialize)]
        struct Post {
            id: String,
            title: String,
        }

        let response = Response::from_value(json!({
            "posts": [{"id": "1", "title": "Hello"}, {"id": "2", "title": "World"}]
        }));

        let posts: Vec<Post> = response.items_as().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].id, "2");
        assert_eq!(posts[0].title, "Hello");
    }

    #[test]
    fn test_get_path() {
        let response = Response::from_value(json!({
            "posts": [{"title": "T", "authors": [{"name": "Ada"}]}]
        }));

        assert_eq!(response.get_string("title"), Some("T".to_string()));
        assert_eq!(response.get_string("authors/0/name"), Some("Ada".to_string()));
        assert!(response.get("authors/5/name").is_none());
    }
}

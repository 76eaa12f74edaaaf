//! GraphQL documents and wire envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{null_as_default, Item, ItemId, NewItem};
use crate::error::{RemoteError, RemoteResult};

pub const LIST_TODOS: &str = "query ListTodos($limit: Int) {
  listTodos(limit: $limit) {
    items { id name description }
  }
}";

pub const CREATE_TODO: &str = "mutation CreateTodo($input: CreateTodoInput!) {
  createTodo(input: $input) { id name description }
}";

pub const DELETE_TODO: &str = "mutation DeleteTodo($input: DeleteTodoInput!) {
  deleteTodo(input: $input) { id }
}";

pub const ON_CREATE_TODO: &str = "subscription OnCreateTodo {
  onCreateTodo { id name description }
}";

// ========================
// Request Structs
// ========================

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Serialize)]
pub struct ListVars {
    pub limit: usize,
}

#[derive(Debug, Serialize)]
pub struct InputVars<T: Serialize> {
    pub input: T,
}

#[derive(Debug, Serialize)]
pub struct DeleteInput<'a> {
    pub id: &'a ItemId,
}

#[derive(Debug, Serialize)]
pub struct NoVars {}

pub fn list_request(limit: usize) -> GraphQlRequest<'static, ListVars> {
    GraphQlRequest {
        query: LIST_TODOS,
        variables: ListVars { limit },
    }
}

pub fn create_request(item: &NewItem) -> GraphQlRequest<'static, InputVars<&NewItem>> {
    GraphQlRequest {
        query: CREATE_TODO,
        variables: InputVars { input: item },
    }
}

pub fn delete_request(id: &ItemId) -> GraphQlRequest<'static, InputVars<DeleteInput<'_>>> {
    GraphQlRequest {
        query: DELETE_TODO,
        variables: InputVars {
            input: DeleteInput { id },
        },
    }
}

pub fn subscribe_request() -> GraphQlRequest<'static, NoVars> {
    GraphQlRequest {
        query: ON_CREATE_TODO,
        variables: NoVars {},
    }
}

// ========================
// Response Structs
// ========================

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlErrorEntry {
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ItemPage {
    #[serde(default, deserialize_with = "null_as_default")]
    items: Vec<Option<Item>>,
}

impl GraphQlResponse {
    /// Take `data.<field>`, turning an `errors` array into [`RemoteError::GraphQl`].
    pub fn into_field(self, field: &'static str) -> RemoteResult<Value> {
        if !self.errors.is_empty() {
            return Err(RemoteError::GraphQl(
                self.errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        match self.data {
            Some(Value::Object(mut data)) => match data.remove(field) {
                Some(Value::Null) | None => Err(RemoteError::MissingData(field)),
                Some(value) => Ok(value),
            },
            _ => Err(RemoteError::MissingData(field)),
        }
    }
}

pub fn decode_list(response: GraphQlResponse) -> RemoteResult<Vec<Item>> {
    let page: ItemPage = serde_json::from_value(response.into_field("listTodos")?)?;
    // Null entries in the page are dropped rather than failing the fetch
    Ok(page.items.into_iter().flatten().collect())
}

pub fn decode_created(response: GraphQlResponse) -> RemoteResult<Item> {
    Ok(serde_json::from_value(response.into_field("createTodo")?)?)
}

pub fn decode_deleted(response: GraphQlResponse) -> RemoteResult<()> {
    response.into_field("deleteTodo").map(|_| ())
}

pub fn decode_event(response: GraphQlResponse) -> RemoteResult<Item> {
    Ok(serde_json::from_value(response.into_field("onCreateTodo")?)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GraphQlResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_decode_list_keeps_order() {
        let items = decode_list(parse(
            r#"{"data":{"listTodos":{"items":[
                {"id":"1","name":"A","description":null},
                null,
                {"id":"2","name":"B","description":"b"}
            ]}}}"#,
        ))
        .unwrap();
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(items[1].description, "b");
    }

    #[test]
    fn test_errors_array_wins() {
        let err = decode_created(parse(
            r#"{"data":{"createTodo":null},"errors":[{"message":"Unauthorized"},{"message":"again"}]}"#,
        ))
        .unwrap_err();
        match err {
            RemoteError::GraphQl(messages) => assert_eq!(messages, vec!["Unauthorized", "again"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_null_items_and_errors_read_as_empty() {
        let items =
            decode_list(parse(r#"{"data":{"listTodos":{"items":null}},"errors":null}"#)).unwrap();
        assert!(items.is_empty());

        let items = decode_list(parse(r#"{"data":{"listTodos":{}}}"#)).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_missing_field() {
        let err = decode_deleted(parse(r#"{"data":{}}"#)).unwrap_err();
        assert!(matches!(err, RemoteError::MissingData("deleteTodo")));
    }

    #[test]
    fn test_request_shape() {
        let item = NewItem::new("C", "desc");
        let body = serde_json::to_value(create_request(&item)).unwrap();
        assert_eq!(body["variables"]["input"]["name"], "C");
        assert_eq!(body["variables"]["input"]["description"], "desc");

        let id = ItemId::new("3");
        let body = serde_json::to_value(delete_request(&id)).unwrap();
        assert_eq!(body["variables"]["input"]["id"], "3");

        let body = serde_json::to_value(list_request(10)).unwrap();
        assert_eq!(body["variables"]["limit"], 10);
    }
}

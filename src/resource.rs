//! Declarative resource operations.
//!
//! A resource type declares which of the six [`Operation`]s it supports with
//! the [`resource!`] macro. Each declared operation becomes an inherent
//! method that forwards to one of the functions in this module; undeclared
//! operations do not exist on the type at all. [`Resource::OPERATIONS`]
//! exposes the same set for runtime inspection.

use crate::client::Client;
use crate::error::{GhostError, Result};
use crate::response::{Params, Response};
use crate::upload::UploadFile;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

/// The operation kinds a resource can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Browse,
    Read,
    Add,
    Edit,
    Delete,
    Upload,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Browse,
        Operation::Read,
        Operation::Add,
        Operation::Edit,
        Operation::Delete,
        Operation::Upload,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Browse => "browse",
            Operation::Read => "read",
            Operation::Add => "add",
            Operation::Edit => "edit",
            Operation::Delete => "delete",
            Operation::Upload => "upload",
        }
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable set of operations declared by a resource type
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OperationSet(u8);

impl OperationSet {
    pub const fn empty() -> Self {
        OperationSet(0)
    }

    /// Browse, read, add, edit and delete
    pub const fn crud() -> Self {
        OperationSet::empty()
            .with(Operation::Browse)
            .with(Operation::Read)
            .with(Operation::Add)
            .with(Operation::Edit)
            .with(Operation::Delete)
    }

    pub const fn with(self, op: Operation) -> Self {
        OperationSet(self.0 | op.bit())
    }

    pub const fn contains(self, op: Operation) -> bool {
        self.0 & op.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Declared operations, in [`Operation::ALL`] order
    pub fn iter(self) -> impl Iterator<Item = Operation> {
        Operation::ALL.into_iter().filter(move |op| self.contains(*op))
    }
}

impl fmt::Debug for OperationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// A resource type bound to a [`Client`]
pub trait Resource: Sized {
    /// Wire name, used in URLs and request/response bodies
    const NAME: &'static str;
    /// Operations this type exposes
    const OPERATIONS: OperationSet;

    fn from_client(client: Client) -> Self;

    fn client(&self) -> &Client;

    fn supports(op: Operation) -> bool {
        Self::OPERATIONS.contains(op)
    }
}

/// Convert caller arguments to a parameter object; `()` and `null` give an empty one.
pub fn into_params<P: Serialize>(params: P) -> Result<Params> {
    match serde_json::to_value(params)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Params::new()),
        other => Err(GhostError::usage(format!(
            "parameters must be a JSON object, got {}",
            other
        ))),
    }
}

/// Remove `key` from `params`, returning it as a path segment when usable.
/// Empty strings and `null` count as absent.
fn take_identifier(params: &mut Params, key: &str) -> Option<String> {
    match params.remove(key)? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn has_identifier(params: &Params, key: &str) -> bool {
    match params.get(key) {
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(_)) => true,
        _ => false,
    }
}

/// GET the collection with `params` as the query string
pub fn browse(client: &Client, resource: &str, params: Params) -> Result<Response> {
    let url = client.config().resource_url(resource);
    let body = client.get(&url, &params)?;
    Ok(Response::from_value(body))
}

/// GET one entry by `id`, `slug` or `email`, tried in that order.
///
/// Only the first identifier present is used; any other identifier stays in
/// `params` and is sent as a query parameter. Callers should pass exactly one.
pub fn read(client: &Client, resource: &str, mut params: Params) -> Result<Response> {
    let present = ["id", "slug", "email"]
        .into_iter()
        .filter(|key| has_identifier(&params, key))
        .count();
    if present > 1 {
        warn!(resource, "read received more than one identifier; using id > slug > email");
    }

    let config = client.config();
    let url = if let Some(id) = take_identifier(&mut params, "id") {
        config.resource_id_url(resource, &id)
    } else if let Some(slug) = take_identifier(&mut params, "slug") {
        config.resource_slug_url(resource, &slug)
    } else if let Some(email) = take_identifier(&mut params, "email") {
        config.resource_email_url(resource, &email)
    } else {
        return Err(GhostError::usage("read requires an id, slug, or email"));
    };

    let body = client.get(&url, &params)?;
    Ok(Response::from_value(body))
}

/// POST `{resource: [fields]}` to the collection
pub fn add(client: &Client, resource: &str, fields: Params) -> Result<Response> {
    let url = client.config().resource_url(resource);
    let body = client.post(&url, wrap(resource, fields))?;
    Ok(Response::from_value(body))
}

/// PUT `{resource: [fields]}` to the entry named by `fields.id`; `id` is not sent in the body
pub fn edit(client: &Client, resource: &str, mut fields: Params) -> Result<Response> {
    let id = take_identifier(&mut fields, "id")
        .ok_or_else(|| GhostError::usage("edit requires an id"))?;
    let url = client.config().resource_id_url(resource, &id);
    let body = client.put(&url, wrap(resource, fields))?;
    Ok(Response::from_value(body))
}

/// DELETE the entry named by `params.id`. Any 2xx, with or without a body, is success.
pub fn delete(client: &Client, resource: &str, mut params: Params) -> Result<bool> {
    let id = take_identifier(&mut params, "id")
        .ok_or_else(|| GhostError::usage("delete requires an id"))?;
    let url = client.config().resource_id_url(resource, &id);
    client.delete(&url)?;
    Ok(true)
}

/// POST a multipart upload to `{resource}/upload/`
pub fn upload(
    client: &Client,
    resource: &str,
    file: UploadFile,
    reference: Option<String>,
) -> Result<Response> {
    let url = client.config().upload_url(resource);
    let body = client.upload(&url, file, reference)?;
    Ok(Response::from_value(body))
}

/// Ghost expects single entries wrapped in a one-element array under the resource name
fn wrap(resource: &str, fields: Params) -> Value {
    let mut body = Map::new();
    body.insert(resource.to_string(), Value::Array(vec![Value::Object(fields)]));
    Value::Object(body)
}

/// ASCII-lowercase `name` into an `N`-byte array at compile time.
#[doc(hidden)]
pub const fn ascii_lowercase<const N: usize>(name: &str) -> [u8; N] {
    let bytes = name.as_bytes();
    let mut out = [0u8; N];
    let mut i = 0;
    while i < N {
        out[i] = bytes[i].to_ascii_lowercase();
        i += 1;
    }
    out
}

/// Declare a resource type and the operations it exposes.
///
/// The wire name defaults to the lower-cased type name; pass it explicitly
/// when Ghost uses something else.
///
/// ```ignore
/// resource! {
///     /// Posts on the Admin API, sent as "posts"
///     Posts, [browse, read, add, edit, delete]
/// }
/// resource! { Hooks, "webhooks", [add, edit, delete] }
/// ```
macro_rules! resource {
    ($(#[$meta:meta])* $name:ident, [$($op:ident),+ $(,)?]) => {
        $crate::resource::resource! {
            $(#[$meta])*
            $name,
            {
                const LEN: usize = stringify!($name).len();
                const LOWER: [u8; LEN] = $crate::resource::ascii_lowercase::<LEN>(stringify!($name));
                match ::core::str::from_utf8(&LOWER) {
                    Ok(name) => name,
                    Err(_) => panic!("resource type name is not valid UTF-8"),
                }
            },
            [$($op),+]
        }
    };

    ($(#[$meta:meta])* $name:ident, $wire:expr, [$($op:ident),+ $(,)?]) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            client: $crate::client::Client,
        }

        impl $crate::resource::Resource for $name {
            const NAME: &'static str = $wire;
            const OPERATIONS: $crate::resource::OperationSet =
                $crate::resource::OperationSet::empty()
                    $(.with($crate::resource::resource!(@kind $op)))+;

            fn from_client(client: $crate::client::Client) -> Self {
                $name { client }
            }

            fn client(&self) -> &$crate::client::Client {
                &self.client
            }
        }

        impl $name {
            $($crate::resource::resource!(@method $op);)+
        }
    };

    (@kind browse) => { $crate::resource::Operation::Browse };
    (@kind read) => { $crate::resource::Operation::Read };
    (@kind add) => { $crate::resource::Operation::Add };
    (@kind edit) => { $crate::resource::Operation::Edit };
    (@kind delete) => { $crate::resource::Operation::Delete };
    (@kind upload) => { $crate::resource::Operation::Upload };

    (@method browse) => {
        /// List entries. `params` (e.g. `limit`, `page`, `filter`, `include`)
        /// are sent verbatim as the query string.
        pub fn browse<P: serde::Serialize>(
            &self,
            params: P,
        ) -> $crate::error::Result<$crate::response::Response> {
            $crate::resource::browse(
                &self.client,
                <Self as $crate::resource::Resource>::NAME,
                $crate::resource::into_params(params)?,
            )
        }
    };
    (@method read) => {
        /// Fetch one entry by `id`, `slug` or `email`; remaining params go
        /// in the query string. Pass exactly one identifier: when several
        /// are given, `id` wins over `slug`, which wins over `email`.
        pub fn read<P: serde::Serialize>(
            &self,
            params: P,
        ) -> $crate::error::Result<$crate::response::Response> {
            $crate::resource::read(
                &self.client,
                <Self as $crate::resource::Resource>::NAME,
                $crate::resource::into_params(params)?,
            )
        }
    };
    (@method add) => {
        /// Create an entry from `fields`
        pub fn add<P: serde::Serialize>(
            &self,
            fields: P,
        ) -> $crate::error::Result<$crate::response::Response> {
            $crate::resource::add(
                &self.client,
                <Self as $crate::resource::Resource>::NAME,
                $crate::resource::into_params(fields)?,
            )
        }
    };
    (@method edit) => {
        /// Update the entry named by `fields.id` with the remaining fields
        pub fn edit<P: serde::Serialize>(
            &self,
            fields: P,
        ) -> $crate::error::Result<$crate::response::Response> {
            $crate::resource::edit(
                &self.client,
                <Self as $crate::resource::Resource>::NAME,
                $crate::resource::into_params(fields)?,
            )
        }
    };
    (@method delete) => {
        /// Delete the entry named by `params.id`
        pub fn delete<P: serde::Serialize>(&self, params: P) -> $crate::error::Result<bool> {
            $crate::resource::delete(
                &self.client,
                <Self as $crate::resource::Resource>::NAME,
                $crate::resource::into_params(params)?,
            )
        }
    };
    (@method upload) => {
        /// Upload a file from disk. The MIME type is taken from the extension.
        pub fn upload(
            &self,
            path: impl AsRef<std::path::Path>,
            reference: Option<&str>,
        ) -> $crate::error::Result<$crate::response::Response> {
            $crate::resource::upload(
                &self.client,
                <Self as $crate::resource::Resource>::NAME,
                $crate::upload::UploadFile::from_path(path)?,
                reference.map(str::to_string),
            )
        }

        /// Upload in-memory content under `file_name`
        pub fn upload_bytes(
            &self,
            file_name: &str,
            content: Vec<u8>,
            reference: Option<&str>,
        ) -> $crate::error::Result<$crate::response::Response> {
            $crate::resource::upload(
                &self.client,
                <Self as $crate::resource::Resource>::NAME,
                $crate::upload::UploadFile::from_bytes(file_name, content),
                reference.map(str::to_string),
            )
        }
    };
}

pub(crate) use resource;

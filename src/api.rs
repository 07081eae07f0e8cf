use crate::admin_key::AdminKey;
use crate::auth::Authenticator;
use crate::client::Client;
use crate::config::{ApiConfig, ApiKind, DEFAULT_VERSION};
use crate::content_key::ContentKey;
use crate::error::{GhostError, Result};
use crate::resources::{admin, content};
use crate::transport::{HttpTransport, Transport};
use std::sync::OnceLock;

/// Generate a facade struct with one memoized accessor per resource.
macro_rules! facade {
    (
        $(#[$meta:meta])*
        $api:ident, $kind:expr, $module:ident { $($field:ident: $ty:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        pub struct $api {
            client: Client,
            $($field: OnceLock<$module::$ty>,)+
        }

        impl $api {
            /// Wire names of the resources this API exposes
            pub const RESOURCES: &'static [&'static str] =
                &[$(<$module::$ty as $crate::resource::Resource>::NAME),+];

            /// Build from an explicit configuration, authenticator and transport.
            ///
            /// Fails if `config` targets the other API surface.
            pub fn from_parts(
                config: ApiConfig,
                authenticator: impl Authenticator + 'static,
                transport: impl Transport + 'static,
            ) -> Result<Self> {
                if config.kind() != $kind {
                    return Err(GhostError::config(format!(
                        "{} cannot use a {} API configuration",
                        stringify!($api),
                        config.kind()
                    )));
                }

                Ok($api {
                    client: Client::new(config, authenticator, transport),
                    $($field: OnceLock::new(),)+
                })
            }

            /// The shared request path, for endpoints without a resource type
            pub fn client(&self) -> &Client {
                &self.client
            }

            $(
                #[doc = concat!("The `", stringify!($field), "` resource, created on first use")]
                pub fn $field(&self) -> &$module::$ty {
                    self.$field.get_or_init(|| {
                        tracing::trace!(api = %$kind, resource = stringify!($field), "initialising resource");
                        <$module::$ty as $crate::resource::Resource>::from_client(self.client.clone())
                    })
                }
            )+
        }

        impl std::fmt::Debug for $api {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($api))
                    .field("client", &self.client)
                    .finish_non_exhaustive()
            }
        }
    };
}

facade! {
    /// Client for the read-only Content API, authenticated with a static key.
    ///
    /// ```no_run
    /// use ghost_api::ContentApi;
    /// use serde_json::json;
    ///
    /// let api = ContentApi::new("https://demo.ghost.io", "22444f78447824223cefc48062")?;
    /// let posts = api.posts().browse(json!({"limit": 3, "include": "authors,tags"}))?;
    /// for post in &posts {
    ///     println!("{}", post["title"]);
    /// }
    /// # Ok::<(), ghost_api::GhostError>(())
    /// ```
    ContentApi, ApiKind::Content, content {
        posts: Posts,
        pages: Pages,
        authors: Authors,
        tags: Tags,
        settings: Settings,
        tiers: Tiers,
        newsletters: Newsletters,
        offers: Offers,
    }
}

facade! {
    /// Client for the Admin API, authenticated with short-lived signed tokens.
    ///
    /// ```no_run
    /// use ghost_api::AdminApi;
    /// use serde_json::json;
    ///
    /// let api = AdminApi::new("https://demo.ghost.io", "6489e4a3b35e12d07a:93fa25c8b293fa25")?;
    /// let created = api.posts().add(json!({"title": "Hello", "status": "draft"}))?;
    /// let id = created.get_string("id").unwrap_or_default();
    /// api.posts().delete(json!({"id": id}))?;
    /// # Ok::<(), ghost_api::GhostError>(())
    /// ```
    AdminApi, ApiKind::Admin, admin {
        posts: Posts,
        pages: Pages,
        tags: Tags,
        members: Members,
        users: Users,
        newsletters: Newsletters,
        tiers: Tiers,
        offers: Offers,
        webhooks: Webhooks,
        site: Site,
        images: Images,
        media: Media,
        files: Files,
        themes: Themes,
    }
}

impl ContentApi {
    /// Connect to `url` with a Content API key, using the default API version
    pub fn new(url: &str, key: &str) -> Result<Self> {
        Self::with_version(url, key, DEFAULT_VERSION)
    }

    pub fn with_version(url: &str, key: &str, version: &str) -> Result<Self> {
        Self::with_transport(url, key, version, HttpTransport::try_new()?)
    }

    pub fn with_transport(
        url: &str,
        key: &str,
        version: &str,
        transport: impl Transport + 'static,
    ) -> Result<Self> {
        let config = ApiConfig::new(url, version, ApiKind::Content, key)?;
        Self::from_parts(config, ContentKey::new(key)?, transport)
    }
}

impl AdminApi {
    /// Connect to `url` with an Admin API key (`{id}:{secret}`), using the default API version
    pub fn new(url: &str, key: &str) -> Result<Self> {
        Self::with_version(url, key, DEFAULT_VERSION)
    }

    pub fn with_version(url: &str, key: &str, version: &str) -> Result<Self> {
        Self::with_transport(url, key, version, HttpTransport::try_new()?)
    }

    pub fn with_transport(
        url: &str,
        key: &str,
        version: &str,
        transport: impl Transport + 'static,
    ) -> Result<Self> {
        let config = ApiConfig::new(url, version, ApiKind::Admin, key)?;
        Self::from_parts(config, AdminKey::new(key)?, transport)
    }
}

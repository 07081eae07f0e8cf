//! Resource declarations for both API surfaces.
//!
//! Operations a resource does not declare are not available on its type:
//!
//! ```compile_fail
//! let api = ghost_api::AdminApi::new("https://demo.ghost.io", "6489e4a3b35e12d07a:93fa25c8").unwrap();
//! // webhooks can be added, edited and deleted, but not listed
//! api.webhooks().browse(());
//! ```
//!
//! ```compile_fail
//! let api = ghost_api::ContentApi::new("https://demo.ghost.io", "abc123").unwrap();
//! // the Content API is read-only
//! api.posts().add(serde_json::json!({"title": "T"}));
//! ```

/// Content API resources: read-only.
pub mod content {
    use crate::resource::resource;

    resource! { Posts, [browse, read] }
    resource! { Pages, [browse, read] }
    resource! { Authors, [browse, read] }
    resource! { Tags, [browse, read] }
    resource! {
        /// Site settings; a single object, so there is nothing to read by id.
        ///
        /// The reply holds an object rather than an array under `settings`,
        /// so [`Response::items`](crate::Response::items) is empty: use
        /// [`Response::data`](crate::Response::data) or `raw()`.
        Settings, [browse]
    }
    resource! { Tiers, [browse, read] }
    resource! { Newsletters, [browse, read] }
    resource! { Offers, [browse, read] }
}

/// Admin API resources.
pub mod admin {
    use crate::resource::resource;

    resource! { Posts, [browse, read, add, edit, delete] }
    resource! { Pages, [browse, read, add, edit, delete] }
    resource! { Tags, [browse, read, add, edit, delete] }
    resource! {
        /// Members can also be read by `email`.
        Members, [browse, read, add, edit, delete]
    }
    resource! {
        /// Staff users; managed through Ghost's own UI.
        Users, [browse, read]
    }
    resource! { Newsletters, [browse, read, add, edit] }
    resource! { Tiers, [browse, read, add, edit] }
    resource! { Offers, [browse, read, add, edit] }
    resource! {
        /// Webhooks are write-only.
        Webhooks, [add, edit, delete]
    }
    resource! {
        /// Basic site information, returned as an object under `site`.
        /// Read it through [`Response::data`](crate::Response::data).
        Site, [read]
    }
    resource! { Images, [upload] }
    resource! { Media, [upload] }
    resource! { Files, [upload] }
    resource! {
        /// Theme archives (`.zip`)
        Themes, [upload]
    }
}

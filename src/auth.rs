use crate::error::Result;
use crate::request::HttpRequest;

/// Adds credentials to an outgoing request.
///
/// Implemented by [`ContentKey`](crate::ContentKey) for the Content API and
/// [`AdminKey`](crate::AdminKey) for the Admin API. Invoked once per request,
/// just before it is handed to the transport.
pub trait Authenticator: Send + Sync {
    fn apply(&self, request: &mut HttpRequest) -> Result<()>;
}

impl<A: Authenticator + ?Sized> Authenticator for Box<A> {
    fn apply(&self, request: &mut HttpRequest) -> Result<()> {
        (**self).apply(request)
    }
}

impl<A: Authenticator + ?Sized> Authenticator for std::sync::Arc<A> {
    fn apply(&self, request: &mut HttpRequest) -> Result<()> {
        (**self).apply(request)
    }
}

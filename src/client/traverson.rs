//! The traversal engine.
//!
//! A [`Traverson`] holds everything that stays fixed across traversals: the
//! base URI, the media types to ask for, the link discoverers and the
//! transport. Each call to [`Traverson::follow`] starts a [`TraversalBuilder`]
//! that owns the relations, template parameters and headers of one traversal.
//!
//! # Examples
//!
//! ```no_run
//! use traverson::{MediaType, Traverson};
//!
//! # async fn run() -> traverson::Result<()> {
//! let traverson = Traverson::new("http://localhost:8080/api", vec![MediaType::hal_json()])?;
//!
//! let name = traverson
//!     .follow(["movies", "movie", "actor"])
//!     .with_template_parameter("page", 2)
//!     .to_path_result("$.name")
//!     .await?;
//! println!("{}", name);
//! # Ok(())
//! # }
//! ```

use super::config::ClientConfig;
use super::relation::RelationResolver;
use super::transport::{ReqwestTransport, Transport};
use super::utils::decode_body;
use crate::discovery::{LinkDiscoverer, LinkDiscoverers};
use crate::error::{Result, TraversonError};
use crate::json_path::JsonPath;
use crate::protocol::{format_accept_header, MediaType};
use crate::types::{Entity, HttpRequest, HttpResponse};
use crate::uri_template::{TemplateParams, TemplateValue, UriTemplate};
use http::header::{HeaderName, ACCEPT};
use http::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use url::Url;

struct Inner {
    base_uri: String,
    media_types: Vec<MediaType>,
    accept: HeaderValue,
    discoverers: LinkDiscoverers,
    transport: Arc<dyn Transport>,
}

/// Hypermedia traversal client.
///
/// Cheap to clone; clones share configuration and transport. Configuration is
/// immutable once built.
#[derive(Clone)]
pub struct Traverson {
    inner: Arc<Inner>,
}

impl Traverson {
    /// Create an engine with the default HAL discoverer and reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`TraversonError::Config`] if `base_uri` is blank or invalid, or
    /// if `media_types` is empty.
    pub fn new(base_uri: impl Into<String>, media_types: Vec<MediaType>) -> Result<Self> {
        Self::builder(base_uri).media_types(media_types).build()
    }

    /// Start configuring an engine for `base_uri`.
    pub fn builder(base_uri: impl Into<String>) -> TraversonBuilder {
        TraversonBuilder::new(base_uri)
    }

    /// Base URI every traversal starts from.
    pub fn base_uri(&self) -> &str {
        &self.inner.base_uri
    }

    /// Media types sent in the `Accept` header, in preference order.
    pub fn media_types(&self) -> &[MediaType] {
        &self.inner.media_types
    }

    /// Registered link discoverers, in lookup order.
    pub fn discoverers(&self) -> &LinkDiscoverers {
        &self.inner.discoverers
    }

    /// Begin a traversal following `rels` in order.
    ///
    /// Relations starting with `$` are JSON path expressions evaluated
    /// against the response body; all others are looked up by the
    /// discoverer registered for the response media type.
    pub fn follow<I, S>(&self, rels: I) -> TraversalBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TraversalBuilder::new(self.clone()).follow(rels)
    }

    /// A traversal with no hops: terminal operations act on the base URI.
    pub fn root(&self) -> TraversalBuilder {
        TraversalBuilder::new(self.clone())
    }
}

impl fmt::Debug for Traverson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traverson")
            .field("base_uri", &self.inner.base_uri)
            .field("media_types", &self.inner.media_types)
            .field("discoverers", &self.inner.discoverers)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Traverson`].
///
/// Starts with no media types, the HAL discoverer and a default
/// [`ReqwestTransport`].
pub struct TraversonBuilder {
    base_uri: String,
    media_types: Vec<MediaType>,
    discoverers: LinkDiscoverers,
    transport: Option<Arc<dyn Transport>>,
    client_config: Option<ClientConfig>,
}

impl TraversonBuilder {
    fn new(base_uri: impl Into<String>) -> Self {
        TraversonBuilder {
            base_uri: base_uri.into(),
            media_types: Vec::new(),
            discoverers: LinkDiscoverers::with_defaults(),
            transport: None,
            client_config: None,
        }
    }

    /// Append a media type to request.
    pub fn media_type(mut self, media_type: MediaType) -> Self {
        self.media_types.push(media_type);
        self
    }

    /// Replace the requested media types.
    pub fn media_types(mut self, media_types: Vec<MediaType>) -> Self {
        self.media_types = media_types;
        self
    }

    /// Use a custom transport instead of [`ReqwestTransport`].
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Configure the default transport. Ignored when a custom transport is set.
    pub fn client_config(mut self, config: ClientConfig) -> Self {
        self.client_config = Some(config);
        self
    }

    /// Register an additional discoverer after the existing ones.
    pub fn discoverer<D: LinkDiscoverer + 'static>(mut self, media_type: MediaType, discoverer: D) -> Self {
        self.discoverers.register(media_type, discoverer);
        self
    }

    /// Replace the discoverer registry, defaults included.
    pub fn discoverers(mut self, discoverers: LinkDiscoverers) -> Self {
        self.discoverers = discoverers;
        self
    }

    /// Validate the configuration and build the engine.
    ///
    /// # Errors
    ///
    /// Returns [`TraversonError::Config`] for a blank or unparsable base URI,
    /// an empty media type list, or transport settings the default transport
    /// rejects.
    pub fn build(self) -> Result<Traverson> {
        let base_uri = self.base_uri.trim().to_string();
        if base_uri.is_empty() {
            return Err(TraversonError::Config("Base URI must not be blank".into()));
        }

        let template = UriTemplate::parse(base_uri.as_str())
            .map_err(|e| TraversonError::Config(format!("Invalid base URI: {}", e)))?;
        if !template.has_variables() {
            Url::parse(&base_uri).map_err(|e| {
                TraversonError::Config(format!("Invalid base URI '{}': {}", base_uri, e))
            })?;
        }

        if self.media_types.is_empty() {
            return Err(TraversonError::Config(
                "At least one media type must be given".into(),
            ));
        }

        let accept = HeaderValue::from_str(&format_accept_header(&self.media_types))
            .map_err(|e| TraversonError::Config(format!("Invalid Accept header: {}", e)))?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::with_config(
                self.client_config.unwrap_or_default(),
            )?),
        };

        Ok(Traverson {
            inner: Arc::new(Inner {
                base_uri,
                media_types: self.media_types,
                accept,
                discoverers: self.discoverers,
                transport,
            }),
        })
    }
}

/// One traversal: the relations to follow plus per-traversal parameters.
///
/// Terminal operations take `&self`, so the same traversal can be executed
/// more than once. Every execution fetches each hop again.
#[derive(Clone)]
pub struct TraversalBuilder {
    engine: Traverson,
    rels: Vec<String>,
    params: TemplateParams,
    headers: HeaderMap,
}

impl TraversalBuilder {
    fn new(engine: Traverson) -> Self {
        TraversalBuilder {
            engine,
            rels: Vec::new(),
            params: TemplateParams::new(),
            headers: HeaderMap::new(),
        }
    }

    /// Append relations to follow.
    pub fn follow<I, S>(mut self, rels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rels.extend(rels.into_iter().map(Into::into));
        self
    }

    /// Replace the parameters used to expand every URI of the traversal.
    pub fn with_template_parameters(mut self, params: TemplateParams) -> Self {
        self.params = params;
        self
    }

    /// Set one template parameter.
    pub fn with_template_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<TemplateValue>,
    ) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Replace the extra headers sent with every request.
    ///
    /// An `Accept` header given here overrides the configured media types.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Set one extra header, replacing same-named values.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Relations still to follow, as given.
    pub fn rels(&self) -> &[String] {
        &self.rels
    }

    /// Follow every relation and return the URI the last one points to.
    ///
    /// The final URI itself is not fetched.
    pub async fn final_uri(&self) -> Result<String> {
        let discoverers = &self.engine.inner.discoverers;
        let mut uri = self.resolve_uri(&self.engine.inner.base_uri, None)?;

        for rel in &self.rels {
            let resolver = RelationResolver::for_rel(rel);
            tracing::debug!(uri = %uri, rel = %rel, "following relation");

            let response = self.get(&uri).await?;
            let body = response.text()?;
            let media_type = response
                .content_type()
                .unwrap_or_else(|| self.engine.inner.media_types[0].clone());

            let link = match resolver.resolve(&body, &media_type, discoverers)? {
                Some(link) => link,
                None => {
                    return Err(TraversonError::LinkNotFound {
                        rel: rel.clone(),
                        body,
                    })
                }
            };
            tracing::debug!(rel = %link.rel, href = %link.href, "resolved link");

            uri = self.resolve_uri(&link.href, Some(&uri))?;
        }

        Ok(uri)
    }

    /// Traverse and return the raw final response.
    pub async fn to_response(&self) -> Result<HttpResponse> {
        let uri = self.final_uri().await?;
        self.get(&uri).await
    }

    /// Traverse and decode the final body as JSON.
    ///
    /// Use [`Resource<T>`](crate::hal::Resource) as `T` to keep HAL links.
    pub async fn to_object<T: DeserializeOwned>(&self) -> Result<T> {
        let response = self.to_response().await?;
        decode_body(&response.body, response.content_type().as_ref())
    }

    /// Traverse and decode the final body, keeping status and headers.
    pub async fn to_entity<T: DeserializeOwned>(&self) -> Result<Entity<T>> {
        let response = self.to_response().await?;
        let body = decode_body(&response.body, response.content_type().as_ref())?;
        Ok(Entity {
            status: response.status,
            headers: response.headers,
            body,
        })
    }

    /// Traverse and read the value at `expression` in the final body.
    ///
    /// The expression is checked before any request is made.
    pub async fn to_path_result(&self, expression: &str) -> Result<String> {
        let path = JsonPath::parse(expression)?;
        let response = self.to_response().await?;
        path.read_scalar(&response.text()?)
    }

    /// Traverse and return the final body as text.
    pub async fn to_text(&self) -> Result<String> {
        self.to_response().await?.text()
    }

    /// Expand `href` with the traversal parameters and make it absolute.
    fn resolve_uri(&self, href: &str, current: Option<&str>) -> Result<String> {
        let expanded = UriTemplate::parse(href)?.expand(&self.params)?;
        let invalid = |reason: String| TraversonError::InvalidUri {
            uri: expanded.clone(),
            reason,
        };

        let url = match current {
            None => Url::parse(&expanded).map_err(|e| invalid(e.to_string()))?,
            Some(current) => Url::parse(current)
                .and_then(|base| base.join(&expanded))
                .map_err(|e| invalid(e.to_string()))?,
        };
        Ok(url.to_string())
    }

    async fn get(&self, uri: &str) -> Result<HttpResponse> {
        let request = HttpRequest::get(uri)
            .with_header(ACCEPT, self.engine.inner.accept.clone())
            .with_headers(&self.headers);

        let response = self.engine.inner.transport.execute(request).await?;
        if !response.is_success() {
            return Err(TraversonError::Status {
                uri: uri.to_string(),
                status: response.status,
            });
        }
        Ok(response)
    }
}

impl fmt::Debug for TraversalBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraversalBuilder")
            .field("base_uri", &self.engine.base_uri())
            .field("rels", &self.rels)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

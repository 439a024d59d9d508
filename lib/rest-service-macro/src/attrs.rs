//! Attribute parsing for rest-service proc-macros.

use syn::parse::{Parse, ParseStream};
use syn::{Expr, Ident, LitBool, LitStr, Token, Type};

/// HTTP verb of a declared operation.
///
/// Registration accepts any verb the `http` crate names; only GET, POST,
/// PUT, PATCH and DELETE can actually be called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
    Connect,
}

impl HttpMethod {
    /// Name of the matching `http::Method` constant.
    #[must_use]
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
            Self::Connect => "CONNECT",
        }
    }

    /// Parse a verb (case-insensitive).
    /// Returns `None` for verbs without an `http::Method` constant.
    #[must_use]
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "PATCH" => Some(Self::Patch),
            "DELETE" => Some(Self::Delete),
            "HEAD" => Some(Self::Head),
            "OPTIONS" => Some(Self::Options),
            "TRACE" => Some(Self::Trace),
            "CONNECT" => Some(Self::Connect),
            _ => None,
        }
    }

    /// Verb for a shorthand attribute (`#[get]`, `#[post]`, ...).
    #[must_use]
    pub(crate) fn from_attr_name(name: &str) -> Option<Self> {
        match name {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "put" => Some(Self::Put),
            "patch" => Some(Self::Patch),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// A `("name", value)` pair, as in `header("Accept", "application/json")`.
pub(crate) struct Entry {
    pub(crate) name: LitStr,
    pub(crate) value: Expr,
}

impl Parse for Entry {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let content;
        syn::parenthesized!(content in input);
        let name = content.parse()?;
        content.parse::<Token![,]>()?;
        let value = content.parse()?;
        content.parse::<Option<Token![,]>>()?;
        Ok(Self { name, value })
    }
}

/// Arguments of `#[service(...)]`.
///
/// ```text
/// #[service(
///     host = "https://api.example.com",
///     output = Record,
///     serializer = RecordSerializer,
///     debug = true,
///     header("Accept", "application/json"),
///     param("format", "json"),
/// )]
/// ```
#[derive(Default)]
pub(crate) struct ServiceArgs {
    pub(crate) host: Option<LitStr>,
    pub(crate) output: Option<Type>,
    pub(crate) serializer: Option<Expr>,
    pub(crate) debug: Option<LitBool>,
    pub(crate) headers: Vec<Entry>,
    pub(crate) params: Vec<Entry>,
}

impl Parse for ServiceArgs {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let mut args = Self::default();

        while !input.is_empty() {
            let key: Ident = input.parse()?;
            match key.to_string().as_str() {
                "host" => args.host = Some(parse_value(input)?),
                "output" => args.output = Some(parse_value(input)?),
                "serializer" => args.serializer = Some(parse_value(input)?),
                "debug" => args.debug = Some(parse_value(input)?),
                "header" => args.headers.push(input.parse()?),
                "param" => args.params.push(input.parse()?),
                other => {
                    return Err(syn::Error::new(
                        key.span(),
                        format!(
                            "unsupported service attribute `{other}`. Expected: host, output, serializer, debug, header, param"
                        ),
                    ));
                }
            }

            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }

        Ok(args)
    }
}

/// Arguments of a verb attribute.
///
/// ```text
/// #[post("/albums/:album_id/photos", param("album_id", 1), payload("title", "draft"))]
/// #[get("/posts/:id", serializer = PostSerializer)]
/// #[http("HEAD /photos")]
/// ```
pub(crate) struct EndpointArgs {
    pub(crate) path: LitStr,
    pub(crate) params: Vec<Entry>,
    pub(crate) headers: Vec<Entry>,
    pub(crate) payload: Vec<Entry>,
    pub(crate) serializer: Option<Expr>,
}

impl Parse for EndpointArgs {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let mut args = Self {
            path: input.parse()?,
            params: Vec::new(),
            headers: Vec::new(),
            payload: Vec::new(),
            serializer: None,
        };

        while !input.is_empty() {
            input.parse::<Token![,]>()?;
            if input.is_empty() {
                break;
            }

            let key: Ident = input.parse()?;
            match key.to_string().as_str() {
                "param" => args.params.push(input.parse()?),
                "header" => args.headers.push(input.parse()?),
                "payload" => args.payload.push(input.parse()?),
                "serializer" => args.serializer = Some(parse_value(input)?),
                other => {
                    return Err(syn::Error::new(
                        key.span(),
                        format!(
                            "unsupported endpoint option `{other}`. Expected: param, header, payload, serializer"
                        ),
                    ));
                }
            }
        }

        Ok(args)
    }
}

fn parse_value<T: Parse>(input: ParseStream<'_>) -> syn::Result<T> {
    input.parse::<Token![=]>()?;
    input.parse()
}

/// Split a `"VERB /path"` string from `#[http(...)]`.
pub(crate) fn split_verb_and_path(spec: &LitStr) -> syn::Result<(HttpMethod, LitStr)> {
    let value = spec.value();
    let (verb, path) = value.split_once(' ').ok_or_else(|| {
        syn::Error::new(
            spec.span(),
            "expected format: \"METHOD /path\" (e.g., \"GET /photos/:id\")",
        )
    })?;

    let method = HttpMethod::parse(verb).ok_or_else(|| {
        syn::Error::new(
            spec.span(),
            format!(
                "unknown HTTP method: {verb}. Expected one of GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS, TRACE, CONNECT"
            ),
        )
    })?;

    Ok((method, LitStr::new(path.trim_start(), spec.span())))
}

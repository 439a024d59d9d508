//! Code generation for rest-service proc-macros.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, Type, Visibility};

use crate::attrs::{Entry, ServiceArgs};
use crate::expand::Operation;

/// Generate the client struct, its builder and the wiring to [`Service`].
///
/// [`Service`]: https://docs.rs/rest-service/latest/rest_service/struct.Service.html
pub fn generate_client_struct(
    vis: &Visibility,
    trait_name: &Ident,
    client_name: &Ident,
    builder_name: &Ident,
    output: &Type,
    declaration: &TokenStream,
) -> TokenStream {
    let client_doc = format!("Generated client implementing [`{trait_name}`].");
    let builder_doc = format!("Builder for [`{client_name}`].");

    quote! {
        #[doc = #client_doc]
        #vis struct #client_name<T = ::rest_service::HyperTransport> {
            service: ::rest_service::Service<#output, T>,
        }

        impl<T> #client_name<T> {
            /// Declaration shared by every client of this type.
            #[must_use]
            pub fn declaration() -> ::std::sync::Arc<::rest_service::ServiceDeclaration<#output>> {
                static DECLARATION: ::std::sync::LazyLock<
                    ::std::sync::Arc<::rest_service::ServiceDeclaration<#output>>,
                > = ::std::sync::LazyLock::new(|| ::std::sync::Arc::new(#declaration));
                ::std::sync::Arc::clone(&DECLARATION)
            }

            /// Start building a client over `transport`.
            #[must_use]
            pub fn builder(transport: T) -> #builder_name<T> {
                #builder_name {
                    inner: ::rest_service::Service::builder(Self::declaration(), transport),
                }
            }

            /// Client over `transport` with the declared configuration.
            #[must_use]
            pub fn with_transport(transport: T) -> Self {
                Self::builder(transport).build()
            }

            /// Wrap an existing service instance.
            #[must_use]
            pub const fn from_service(service: ::rest_service::Service<#output, T>) -> Self {
                Self { service }
            }

            /// The underlying service instance.
            #[must_use]
            pub const fn service(&self) -> &::rest_service::Service<#output, T> {
                &self.service
            }

            /// Mutable access to the underlying service instance.
            pub fn service_mut(&mut self) -> &mut ::rest_service::Service<#output, T> {
                &mut self.service
            }

            /// Unwrap the underlying service instance.
            #[must_use]
            pub fn into_service(self) -> ::rest_service::Service<#output, T> {
                self.service
            }
        }

        impl #client_name {
            /// Client over a default [`HyperTransport`](::rest_service::HyperTransport).
            #[must_use]
            pub fn new() -> Self {
                Self::with_transport(::rest_service::HyperTransport::new())
            }
        }

        impl ::std::default::Default for #client_name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<T> ::std::ops::Deref for #client_name<T> {
            type Target = ::rest_service::Service<#output, T>;

            fn deref(&self) -> &Self::Target {
                &self.service
            }
        }

        impl<T> ::std::ops::DerefMut for #client_name<T> {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.service
            }
        }

        impl<T: ::std::clone::Clone> ::std::clone::Clone for #client_name<T> {
            fn clone(&self) -> Self {
                Self {
                    service: self.service.clone(),
                }
            }
        }

        impl<T> ::std::fmt::Debug for #client_name<T> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_tuple(stringify!(#client_name))
                    .field(&self.service)
                    .finish()
            }
        }

        #[doc = #builder_doc]
        #vis struct #builder_name<T = ::rest_service::HyperTransport> {
            inner: ::rest_service::ServiceBuilder<#output, T>,
        }

        impl<T> #builder_name<T> {
            /// Override the declared host.
            #[must_use]
            pub fn host(mut self, host: impl Into<String>) -> Self {
                self.inner = self.inner.host(host);
                self
            }

            /// Override the declared serializer.
            #[must_use]
            pub fn serializer<S>(mut self, serializer: S) -> Self
            where
                S: ::rest_service::Serializer<Output = #output> + 'static,
            {
                self.inner = self.inner.serializer(serializer);
                self
            }

            /// Override the declared default headers.
            #[must_use]
            pub fn headers(mut self, headers: ::rest_service::Headers) -> Self {
                self.inner = self.inner.headers(headers);
                self
            }

            /// Override the declared default params.
            #[must_use]
            pub fn params(mut self, params: ::rest_service::Params) -> Self {
                self.inner = self.inner.params(params);
                self
            }

            /// Override the declared debug flag.
            #[must_use]
            pub fn debug(mut self, debug: bool) -> Self {
                self.inner = self.inner.debug(debug);
                self
            }

            /// Build the client.
            #[must_use]
            pub fn build(self) -> #client_name<T> {
                #client_name {
                    service: self.inner.build(),
                }
            }
        }
    }
}

/// Generate the expression building the [`ServiceDeclaration`].
///
/// [`ServiceDeclaration`]: https://docs.rs/rest-service/latest/rest_service/struct.ServiceDeclaration.html
pub fn generate_declaration(args: &ServiceArgs, output: &Type, operations: &[Operation]) -> TokenStream {
    let mut declaration = quote! {
        ::rest_service::ServiceDeclaration::<#output>::new()
    };

    if let Some(host) = &args.host {
        declaration.extend(quote! { .host(#host) });
    }
    if let Some(serializer) = &args.serializer {
        declaration.extend(quote! { .serializer(#serializer) });
    }
    if let Some(debug) = &args.debug {
        declaration.extend(quote! { .debug(#debug) });
    }
    for Entry { name, value } in &args.headers {
        declaration.extend(quote! { .header(#name, #value) });
    }
    for Entry { name, value } in &args.params {
        declaration.extend(quote! { .param(#name, #value) });
    }

    for operation in operations {
        let verb = Ident::new(operation.method.as_str(), proc_macro2::Span::call_site());
        let name = operation.sig.ident.to_string();
        let path = &operation.args.path;
        let options = generate_endpoint_options(operation);

        declaration.extend(quote! {
            .register(::rest_service::http::Method::#verb, #name, #path, #options)
        });
    }

    declaration
}

/// Generate the `EndpointOptions` expression for one operation.
fn generate_endpoint_options(operation: &Operation) -> TokenStream {
    let mut options = quote! { ::rest_service::EndpointOptions::new() };

    for Entry { name, value } in &operation.args.params {
        options.extend(quote! { .param(#name, #value) });
    }
    for Entry { name, value } in &operation.args.headers {
        options.extend(quote! { .header(#name, #value) });
    }
    for Entry { name, value } in &operation.args.payload {
        options.extend(quote! { .payload(#name, #value) });
    }
    if let Some(serializer) = &operation.args.serializer {
        options.extend(quote! { .serializer(#serializer) });
    }

    options
}

/// Generate the body of one operation method.
pub fn generate_method_body(operation: &Operation) -> TokenStream {
    let name = operation.sig.ident.to_string();
    let invocation = operation.invocation.as_ref().map_or_else(
        || quote! { ::rest_service::Invocation::new() },
        |ident| quote! { #ident },
    );

    quote! {
        self.service.call(#name, #invocation).await
    }
}

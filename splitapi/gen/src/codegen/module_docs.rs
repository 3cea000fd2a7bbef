//! Module documentation generation for generated clients.
//!
//! This module provides the [`ModuleDocBuilder`] struct for generating
//! module-level documentation: an introduction, the endpoint list, the
//! generated hooks, and a usage example.

use std::collections::BTreeMap;

use proc_macro2::TokenStream;
use quote::quote;
use splitapi_define::{ApiDefinition, EndpointKind, HookFlags};

use crate::naming::{to_pascal_case, to_snake_case};

/// Builds module-level documentation for a generated client.
///
/// The builder generates documentation sections including:
/// - Introduction paragraph with API title, version and description
/// - Endpoints section listing endpoints grouped by HTTP method
/// - Hooks section listing the generated hook accessors
/// - Example section using the first query
///
/// ## Examples
///
/// ```ignore
/// use splitapi_gen::codegen::ModuleDocBuilder;
///
/// let doc_tokens = ModuleDocBuilder::new(&api, "serverApi", flags).build();
/// ```
pub struct ModuleDocBuilder<'a> {
    api: &'a ApiDefinition,
    export_name: &'a str,
    hooks: HookFlags,
}

impl<'a> ModuleDocBuilder<'a> {
    /// Creates a new module documentation builder.
    pub fn new(api: &'a ApiDefinition, export_name: &'a str, hooks: HookFlags) -> Self {
        Self {
            api,
            export_name,
            hooks,
        }
    }

    /// Builds the complete module documentation as a token stream.
    ///
    /// The generated tokens are one `#![doc = "..."]` attribute per line, so
    /// the formatted module shows plain `//!` comments.
    pub fn build(&self) -> TokenStream {
        let sections = [
            self.intro_paragraph(),
            self.endpoints_section(),
            self.hooks_section(),
            self.example_section(),
        ];
        let text = sections.join("\n\n");
        let lines = text.lines();

        quote! {
            #(#![doc = #lines])*
        }
    }

    fn intro_paragraph(&self) -> String {
        let title = &self.api.title;
        let version = &self.api.version;
        match &self.api.description {
            Some(desc) => format!(
                " Generated client for {title} (version {version}).\n\n {}",
                desc.trim()
            ),
            None => format!(" Generated client for {title} (version {version})."),
        }
    }

    /// Groups endpoints by their HTTP method.
    ///
    /// Returns a map from method name (e.g., "GET") to a list of
    /// (endpoint name, path, description) entries.
    fn categorize_endpoints(&self) -> BTreeMap<String, Vec<(String, String, String)>> {
        let mut categories: BTreeMap<String, Vec<(String, String, String)>> = BTreeMap::new();
        for endpoint in &self.api.endpoints {
            categories
                .entry(endpoint.method.to_string())
                .or_default()
                .push((
                    endpoint.name.clone(),
                    endpoint.path.clone(),
                    endpoint.description.clone().unwrap_or_default(),
                ));
        }
        categories
    }

    fn endpoints_section(&self) -> String {
        let categories = self.categorize_endpoints();
        if categories.is_empty() {
            return " ## Endpoints\n\n No endpoints defined.".to_string();
        }

        let mut lines = vec![" ## Endpoints".to_string(), String::new()];
        for (method, endpoints) in &categories {
            lines.push(format!(" **{}**:", method));
            for (name, path, desc) in endpoints {
                if desc.is_empty() {
                    lines.push(format!(" - `{}` - `{}`", name, path));
                } else {
                    lines.push(format!(" - `{}` - `{}` - {}", name, path, desc));
                }
            }
            lines.push(String::new());
        }
        lines.pop();
        lines.join("\n")
    }

    fn hooks_section(&self) -> String {
        let mut hooks = Vec::new();
        for endpoint in &self.api.endpoints {
            let snake = to_snake_case(&endpoint.name);
            match endpoint.kind {
                EndpointKind::Query => {
                    if self.hooks.queries {
                        hooks.push(format!(" - `use_{snake}_query(arg)`"));
                    }
                    if self.hooks.lazy_queries {
                        hooks.push(format!(" - `use_lazy_{snake}_query()`"));
                    }
                }
                EndpointKind::Mutation => {
                    if self.hooks.mutations {
                        hooks.push(format!(" - `use_{snake}_mutation()`"));
                    }
                }
            }
        }

        if hooks.is_empty() {
            return " ## Hooks\n\n No hooks generated.".to_string();
        }

        let mut lines = vec![" ## Hooks".to_string(), String::new()];
        lines.extend(hooks);
        lines.join("\n")
    }

    /// Creates a usage example using the first query, or the first endpoint
    /// if there is no query.
    fn example_section(&self) -> String {
        let endpoint = self
            .api
            .endpoints
            .iter()
            .find(|e| e.kind == EndpointKind::Query)
            .or_else(|| self.api.endpoints.first());

        let Some(endpoint) = endpoint else {
            return " ## Example\n\n No endpoints available for example.".to_string();
        };

        let constructor = to_snake_case(self.export_name);
        let accessor = to_snake_case(&endpoint.name);
        let arg = if endpoint.is_void() {
            "&()".to_string()
        } else {
            format!("&{}ApiArg::default()", to_pascal_case(&endpoint.name))
        };
        let call = match endpoint.kind {
            EndpointKind::Query => "query",
            EndpointKind::Mutation => "mutate",
        };

        format!(
            r#" ## Example

 ```ignore
 #[tokio::main]
 async fn main() -> Result<(), Box<dyn std::error::Error>> {{
     let client = {constructor}()?;
     let response = client.api().{call}(client.{accessor}(), {arg}).await?;
     println!("{{:?}}", response);
     Ok(())
 }}
 ```"#
        )
    }
}

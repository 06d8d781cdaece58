//! Go client generator
//!
//! Generates one marker type, one constructor and one forwarding method per declared API.
//! All formatting lives in `templates/client.go.tera`; this module only prepares the names.

use crate::error::{CliError, CliResult};
use crate::generator::Generator;
use crate::utils::casing::{to_camel_case, to_pascal_case};
use serde::Serialize;
use shugen_compiler::extractor::DISPATCH_RECEIVER;
use shugen_compiler::{Client, Func, Package};
use tera::{Context, Tera};
use tracing::debug;

const CLIENT_TEMPLATE: &str = "client.go.tera";

/// Go client generator
pub struct GoClientGenerator {
    tera: Tera,
}

#[derive(Debug, Serialize)]
struct ClientView {
    /// Marker type name, e.g. `AuthClient`.
    type_name: String,
    /// Constructor name, e.g. `GetAuthClient`.
    constructor: String,
    /// Go string literal of the service name passed to the dispatch registry.
    service: String,
    methods: Vec<MethodView>,
}

#[derive(Debug, Serialize)]
struct MethodView {
    name: String,
    /// Go string literal of the method name passed to the dispatch registry.
    service_method: String,
    /// `ident Type` parameter declarations.
    params: Vec<String>,
    /// Parameter identifiers in declaration order.
    args: Vec<String>,
    response_type: String,
}

impl GoClientGenerator {
    pub fn new() -> Result<Self, CliError> {
        let mut tera = Tera::default();
        tera.add_raw_template(CLIENT_TEMPLATE, include_str!("templates/client.go.tera"))
            .map_err(|e| CliError::Message(format!("Failed to load {CLIENT_TEMPLATE}: {e}")))?;

        // Auto-escape is disabled for Go code generation
        tera.autoescape_on(vec![]);

        Ok(Self { tera })
    }

    fn client_view(client: &Client) -> ClientView {
        let type_name = format!("{}Client", to_pascal_case(&client.name));
        ClientView {
            constructor: format!("Get{type_name}"),
            type_name,
            service: go_string_literal(&client.name),
            methods: client.funcs.iter().map(Self::method_view).collect(),
        }
    }

    fn method_view(func: &Func) -> MethodView {
        let args: Vec<String> = func
            .params
            .iter()
            .map(|param| to_camel_case(&param.type_name))
            .collect();
        let params = func
            .params
            .iter()
            .zip(&args)
            .map(|(param, arg)| format!("{arg} {}", param.type_name))
            .collect();

        MethodView {
            name: to_pascal_case(&func.name),
            service_method: go_string_literal(&func.name),
            params,
            args,
            response_type: func.response_type.clone(),
        }
    }
}

/// Quote `value` as an interpreted Go string literal.
fn go_string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            c if c.is_control() => literal.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

impl Generator for GoClientGenerator {
    fn render(&self, package: &Package) -> CliResult<String> {
        let clients: Vec<ClientView> = package.clients.iter().map(Self::client_view).collect();

        let mut tera_context = Context::new();
        tera_context.insert("package", &package.name);
        tera_context.insert(
            "dispatch_import",
            &package
                .dispatch_import
                .as_deref()
                .map(go_string_literal)
                .unwrap_or_default(),
        );
        tera_context.insert("dispatch", DISPATCH_RECEIVER);
        tera_context.insert("clients", &clients);

        let rendered = self.tera.render(CLIENT_TEMPLATE, &tera_context)?;
        debug!(
            package = %package.name,
            clients = clients.len(),
            bytes = rendered.len(),
            "rendered client code"
        );
        Ok(rendered)
    }
}

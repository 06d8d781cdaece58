//! Unit tests for the Go client generator

use crate::generator::go::GoClientGenerator;
use crate::generator::{generate_client_code, Generator};
use shugen_compiler::{compile_source, Client, Func, Package};

fn auth_package() -> Package {
    let mut package = Package::new("api");
    package.dispatch_import = Some("github.com/example/bundle".to_string());
    let mut client = Client::new("auth");
    client
        .funcs
        .push(Func::new("login", "LoginResp").with_param("UserLogin"));
    package.clients.push(client);
    package
}

#[test]
fn test_generator_initialization() {
    let generator = GoClientGenerator::new();
    assert!(generator.is_ok());
}

#[test]
fn test_generates_marker_type_and_constructor() {
    let code = generate_client_code(&auth_package()).unwrap();

    assert!(code.starts_with("// Code generated by shugen. DO NOT EDIT.\n"));
    assert!(code.contains("package api\n"));
    assert!(code.contains("type AuthClient struct{}"));
    assert!(code.contains("func GetAuthClient() AuthClient {\n\treturn AuthClient{}\n}"));
}

#[test]
fn test_method_forwards_raw_names() {
    let code = generate_client_code(&auth_package()).unwrap();

    assert!(code.contains(
        "func (c AuthClient) Login(userLogin UserLogin) (*LoginResp, error) {"
    ));
    assert!(code.contains("bundle.Get(\"auth\").Call(\"login\", userLogin)"));
    assert!(code.contains("return resp.(*LoginResp), nil"));
    // Registry lookups use the names exactly as declared
    assert!(!code.contains("\"Auth\""));
    assert!(!code.contains("\"Login\""));
}

#[test]
fn test_method_without_params() {
    let mut package = Package::new("api");
    let mut client = Client::new("session");
    client.funcs.push(Func::new("logout", "LogoutResp"));
    package.clients.push(client);

    let code = generate_client_code(&package).unwrap();

    assert!(code.contains("func (c SessionClient) Logout() (*LogoutResp, error) {"));
    assert!(code.contains("Call(\"logout\")"));
    assert!(!code.contains("Call(\"logout\",)"));
}

#[test]
fn test_import_line() {
    let code = generate_client_code(&auth_package()).unwrap();
    assert!(code.contains("import \"github.com/example/bundle\"\n"));

    let mut without_import = auth_package();
    without_import.dispatch_import = None;
    let code = generate_client_code(&without_import).unwrap();
    assert!(!code.contains("import"));
    assert!(code.contains("package api\n\ntype AuthClient struct{}"));
}

#[test]
fn test_preserves_declaration_order() {
    let mut package = Package::new("api");
    for name in ["zeta", "alpha", "mid"] {
        let mut client = Client::new(name);
        client.funcs.push(Func::new("b_call", "BResp"));
        client.funcs.push(Func::new("a_call", "AResp"));
        package.clients.push(client);
    }

    let code = generate_client_code(&package).unwrap();

    let zeta = code.find("type ZetaClient").unwrap();
    let alpha = code.find("type AlphaClient").unwrap();
    let mid = code.find("type MidClient").unwrap();
    assert!(zeta < alpha && alpha < mid);

    let b_call = code.find("func (c ZetaClient) BCall()").unwrap();
    let a_call = code.find("func (c ZetaClient) ACall()").unwrap();
    assert!(b_call < a_call);
    // Each client's methods follow its own constructor
    assert!(code.find("func GetZetaClient()").unwrap() < b_call);
    assert!(a_call < alpha);
}

#[test]
fn test_registry_names_are_quoted_for_go() {
    let mut package = Package::new("api");
    let mut client = Client::new(r"legacy\auth");
    client.funcs.push(Func::new("say \"hi\"", "Greeting"));
    package.clients.push(client);

    let code = generate_client_code(&package).unwrap();

    assert!(code.contains(r#"bundle.Get("legacy\\auth").Call("say \"hi\"")"#));
}

#[test]
fn test_control_characters_in_registry_names_are_escaped() {
    let mut package = Package::new("api");
    let mut client = Client::new("multi\nline");
    client.funcs.push(Func::new("tab\there\u{1}", "Resp"));
    package.clients.push(client);

    let code = generate_client_code(&package).unwrap();

    assert!(code.contains(r#"Get("multi\nline").Call("tab\there\u0001")"#));
}

#[test]
fn test_rendering_is_deterministic() {
    let generator = GoClientGenerator::new().unwrap();
    let package = auth_package();

    let first = generator.render(&package).unwrap();
    let second = generator.render(&package).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_package() {
    let code = generate_client_code(&Package::new("api")).unwrap();
    assert_eq!(code, "// Code generated by shugen. DO NOT EDIT.\n\npackage api\n");
}

#[test]
fn test_casing_of_multi_word_names() {
    let mut package = Package::new("api");
    let mut client = Client::new("user_profile");
    client
        .funcs
        .push(Func::new("get_avatar", "AvatarResp").with_param("HTTPRequest"));
    package.clients.push(client);

    let code = generate_client_code(&package).unwrap();

    assert!(code.contains("type UserProfileClient struct{}"));
    assert!(code.contains("func GetUserProfileClient() UserProfileClient {"));
    assert!(code.contains(
        "func (c UserProfileClient) GetAvatar(httpRequest HTTPRequest) (*AvatarResp, error) {"
    ));
    assert!(code.contains("Get(\"user_profile\").Call(\"get_avatar\", httpRequest)"));
}

#[test]
fn test_full_output() {
    let source = r#"package api

import "github.com/example/bundle"

func init() {
	bundle.Client(bundle.ClientConfig{
		Name: "auth",
		APIs: []bundle.API{
			{
				Name:     "login",
				Params:   UserLogin{},
				Response: LoginResp{},
			},
		},
	})
}
"#;
    let package = compile_source(source).unwrap();
    let code = generate_client_code(&package).unwrap();

    let expected = "// Code generated by shugen. DO NOT EDIT.

package api

import \"github.com/example/bundle\"

type AuthClient struct{}

func GetAuthClient() AuthClient {
\treturn AuthClient{}
}

func (c AuthClient) Login(userLogin UserLogin) (*LoginResp, error) {
\tresp, err := bundle.Get(\"auth\").Call(\"login\", userLogin)
\tif err != nil {
\t\treturn nil, err
\t}
\treturn resp.(*LoginResp), nil
}
";
    assert_eq!(code, expected);
}

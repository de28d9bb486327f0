use indoc::indoc;

use super::*;
use crate::decl::{FieldDecl, MethodDecl, Node, SourceFile};
use crate::project::{Project, ProjectConfig, ResolvedProject};
use crate::test_utils::{SERVICE_JSON, USERS_JSON, resolve};

fn catalog() -> ResolvedProject {
    let file = SourceFile::new("")
        .with_decl(
            "Catalog",
            Node::Interface {
                methods: vec![
                    MethodDecl {
                        name: "List".into(),
                        ty: Node::function(
                            vec![Node::ident("Page")],
                            vec![Node::array(Node::ident("string"))],
                        ),
                    },
                    MethodDecl {
                        name: "Lookup".into(),
                        ty: Node::function(vec![Node::ident("ID")], vec![]),
                    },
                ],
                embeds: vec![],
            },
        )
        .with_decl(
            "Page",
            Node::Struct {
                fields: vec![
                    FieldDecl {
                        names: vec![],
                        ty: Node::ident("Base"),
                    },
                    FieldDecl {
                        names: vec!["Counts".into()],
                        ty: Node::map(Node::ident("string"), Node::ident("int")),
                    },
                ],
            },
        )
        .with_decl("Base", Node::structure([("ID", Node::ident("int"))]))
        .with_decl("ID", Node::alias(Node::ident("int")));
    Project::new(ProjectConfig::default())
        .add_file(file)
        .resolve()
        .unwrap()
}

#[test]
fn every_family() {
    let project = catalog();
    let service = project.service("", "Catalog").unwrap();
    let mut renderer = OutlineRenderer::new(OutlineConfig::new().indent("\t").signatures(false));

    let bindings = project
        .emit(service, EmitConfig::new(), &mut renderer)
        .unwrap();

    assert_eq!(
        bindings.client.body,
        "type CatalogClient client for Catalog\n\tList(Page)([]string)\n\tLookup(ID)\n"
    );
    assert_eq!(
        bindings.writers.body,
        concat!(
            "func Write_Page(Page) [record]\n",
            "\tembed via Write_Base\n",
            "\tCounts via Write_Map_string_int\n",
            "\n",
            "func Write_Base(Base) [record]\n",
            "\tID via Write_int (supplied)\n",
            "\n",
            "func Write_Map_string_int(map[string]int) [map]\n",
            "\tkey via Write_string (supplied)\n",
            "\tvalue via Write_int (supplied)\n",
            "\n",
            "func Write_List_string([]string) [list]\n",
            "\telement via Write_string (supplied)\n",
            "\n",
            "func Write_ID(ID) [alias]\n",
            "\ttarget via Write_int (supplied)\n",
            "\n",
        )
    );
}

#[test]
fn operation_with_signatures() {
    let project = catalog();
    let service = project.service("", "Catalog").unwrap();
    let config = EmitConfig::new()
        .client_prefix("Http")
        .operation(Some("List".to_string()));

    let bindings = project
        .emit(service, config, &mut OutlineRenderer::default())
        .unwrap();

    assert_eq!(
        bindings.operations.body,
        indoc! {"
            func (c *HttpCatalogClient) List
              arg0 Page via Write_Page
              ret0 []string via Read_List_string

        "}
    );
}

#[test]
fn colored_client() {
    let project = resolve(&[SERVICE_JSON, USERS_JSON]);
    let service = project.service("", "UserService").unwrap();
    let mut renderer = OutlineRenderer::new(OutlineConfig::new().colored(true));

    let bindings = project
        .emit(service, EmitConfig::new(), &mut renderer)
        .unwrap();

    assert_eq!(
        bindings.client.body,
        "type \x1b[34mUserServiceClient\x1b[0m client for UserService\n  SaveUser(SaveUserRequest)(error)\n"
    );
    assert!(
        bindings
            .writers
            .body
            .contains("  U \x1b[34m*User\x1b[0m \x1b[2mvia\x1b[0m Write_User\n")
    );
}

#[test]
fn child_without_codec() {
    let file = SourceFile::new("")
        .with_decl(
            "Svc",
            Node::Interface {
                methods: vec![MethodDecl {
                    name: "Run".into(),
                    ty: Node::function(vec![Node::ident("Job")], vec![]),
                }],
                embeds: vec![],
            },
        )
        .with_decl(
            "Job",
            Node::structure([("Done", Node::function(vec![], vec![]))]),
        );
    let project = Project::new(ProjectConfig::default())
        .add_file(file)
        .resolve()
        .unwrap();
    let service = project.service("", "Svc").unwrap();

    let bindings = project
        .emit(service, EmitConfig::new(), &mut OutlineRenderer::default())
        .unwrap();

    assert_eq!(
        bindings.writers.body,
        "func Write_Job(Job) [record]\n  Done func() via <none>\n\n"
    );
}

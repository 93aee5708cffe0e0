use pretty_assertions::assert_eq;
use swagmark_core::model::{ParameterLocation, Scheme, SecuritySchemeType};
use swagmark_core::{assemble, AssemblyError, Document, RawBlock, SourceBlocks, ValidationError};

const META: &str = r#"/* api:meta
Info:
    Title: Swagger Petstore
    Description: |
        This is a sample server Petstore server.
        For this sample, you can use the api key `special-key` to test the authorization filters.
    TermsOfService: "http://swagger.io/terms/"
    Contact:
        Name: John Doe
        Url: "http://swagger.io"
        Email: apiteam@swagger.io
    License:
        Name: Apache 2.0
        Url: "http://www.apache.org/licenses/LICENSE-2.0.html"
    Version: 1.0.0
Host: petstore.swagger.io
BasePath: /v2
Consumes:
    - application/json
    - application/xml
Produces:
    - application/json
    - application/xml
Schemes:
    - http
SecurityDefinitions:
    api_key:
        In: header
        Name: api_key
        Type: apiKey
    petstore_auth:
        AuthorizationUrl: "http://petstore.swagger.io/api/oauth/dialog"
        Flow: implicit
        Type: oauth2
        Scopes:
            "read:pets": read your pets
            "write:pets": modify pets in your account
ExternalDocs:
    Description: Find out more about Swagger
    Url: "http://swagger.io"
Tags:
    - Name: pet
      Description: Everything about your Pets
      ExternalDocs:
        Description: Find out more
        Url: "http://swagger.io"
*/"#;

const ROUTE: &str = r##"/* api:route
"/pet/{petId}":
    Get:
        Description: Returns a single pet
        OperationId: getPetById
        Parameters:
            - Description: ID of pet to return
              Format: int64
              In: path
              Name: petId
              Required: true
              Type: integer
        Produces:
            - application/xml
            - application/json
        Responses:
            200:
                Description: successful operation
                Schema:
                    "$ref": "#/definitions/Pet"
            400:
                Description: Invalid ID supplied
            404:
                Description: Pet not found
        Security:
            - api_key: []
        Summary: Find pet by ID
        Tags:
            - pet
*/"##;

const PET: &str = r##"/* api:model
Pet:
    Xml:
        Name: Pet
    Type: object
    Required:
        - name
        - photoUrls
    Properties:
        category:
            $ref: "#/definitions/Category"
        id:
            Type: integer
            Format: int64
        name:
            Type: string
            Example: doggie
        photoUrls:
            Type: array
            Xml:
                Name: photoUrl
                Wrapped: true
            Items:
                Type: string
        status:
            Description: pet status in the store
            Enum:
                - available
                - pending
                - sold
            Type:
                string
        tags:
            Items:
                $ref: "#/definitions/Tag"
            Type: array
            Xml:
                Name: tag
                Wrapped: true
*/"##;

const CATEGORY: &str = "/* api:model\nCategory:\n    Type: object\n    Xml:\n        Name: Category\n    Properties:\n        id:\n            Type: integer\n            Format: int64\n        name:\n            Type: string\n*/";

const TAG: &str = "/* api:model\nTag:\n    Type: object\n    Xml:\n        Name: Tag\n    Properties:\n        id:\n            Type: integer\n            Format: int64\n        name:\n            Type: string\n*/";

fn file(path: &str, blocks: &[&str]) -> SourceBlocks {
    SourceBlocks::new(path, blocks.iter().map(|b| RawBlock::new(b)).collect())
}

fn petstore() -> Vec<SourceBlocks> {
    vec![
        file("api_meta.go", &[META, "// This is a test"]),
        file("api_model.go", &[PET, CATEGORY, TAG]),
        file("api_route.go", &[ROUTE]),
    ]
}

#[test]
fn petstore_end_to_end() {
    let doc = assemble(petstore()).unwrap();

    assert_eq!(doc.swagger, Document::SWAGGER_VERSION);
    let info = doc.info.as_ref().unwrap();
    assert_eq!(info.title, "Swagger Petstore");
    assert_eq!(info.version, "1.0.0");
    assert_eq!(
        info.contact.as_ref().unwrap().email.as_deref(),
        Some("apiteam@swagger.io")
    );
    assert_eq!(doc.host.as_deref(), Some("petstore.swagger.io"));
    assert_eq!(doc.base_path.as_deref(), Some("/v2"));
    assert_eq!(doc.schemes, vec![Scheme::Http]);

    let paths = doc.paths.as_ref().unwrap();
    assert_eq!(paths.keys().collect::<Vec<_>>(), vec!["/pet/{petId}"]);
    let get = paths["/pet/{petId}"].get.as_ref().unwrap();
    assert_eq!(get.operation_id.as_deref(), Some("getPetById"));
    assert_eq!(get.parameters[0].location, ParameterLocation::Path);
    assert!(get.parameters[0].required);
    assert_eq!(
        get.responses.keys().collect::<Vec<_>>(),
        vec!["200", "400", "404"]
    );
    assert_eq!(
        get.responses["200"]
            .schema
            .as_ref()
            .unwrap()
            .reference
            .as_deref(),
        Some("#/definitions/Pet")
    );
    assert_eq!(get.security[0]["api_key"], Vec::<String>::new());

    let definitions = doc.definitions.as_ref().unwrap();
    assert_eq!(
        definitions.keys().collect::<Vec<_>>(),
        vec!["Category", "Pet", "Tag"]
    );
    let pet = &definitions["Pet"];
    assert_eq!(
        pet.properties["category"].reference.as_deref(),
        Some("#/definitions/Category")
    );
    assert!(pet.properties["photoUrls"].xml.as_ref().unwrap().wrapped);
    assert_eq!(pet.properties["status"].kind.as_deref(), Some("string"));

    let schemes = &doc.security_definitions;
    assert_eq!(schemes["api_key"].kind, SecuritySchemeType::ApiKey);
    assert_eq!(schemes["petstore_auth"].scopes.len(), 2);
}

#[test]
fn petstore_block_order_across_files_does_not_matter_for_distinct_keys() {
    let mut files = petstore();
    files.reverse();
    let reversed = assemble(files).unwrap();
    assert_eq!(reversed, assemble(petstore()).unwrap());
}

#[test]
fn petstore_serializes_with_canonical_field_names() {
    let doc = assemble(petstore()).unwrap();
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["swagger"], "2.0");
    assert_eq!(json["basePath"], "/v2");
    assert_eq!(json["info"]["termsOfService"], "http://swagger.io/terms/");
    assert_eq!(
        json["paths"]["/pet/{petId}"]["get"]["parameters"][0]["in"],
        "path"
    );
    assert_eq!(
        json["definitions"]["Pet"]["properties"]["tags"]["items"]["$ref"],
        "#/definitions/Tag"
    );
    assert_eq!(json["securityDefinitions"]["petstore_auth"]["flow"], "implicit");
}

#[test]
fn meta_without_routes_fails_on_paths() {
    let err = assemble(vec![file("api_meta.go", &[META])]).unwrap_err();
    match err {
        AssemblyError::Validation(e) => {
            assert_eq!(e, ValidationError::MissingPaths);
            assert_eq!(e.field(), "paths");
        }
        other => panic!("unexpected error: {other}"),
    }
}

//! Template rendering for artifact contents.

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::artifact::{ArtifactDescriptor, ArtifactKind, ModuleLayout};
use crate::names::NameForms;
use crate::resource::ResourceSpec;

const MODEL_TEMPLATE: &str = include_str!("../templates/model.ts.tpl");
const CREATE_DTO_TEMPLATE: &str = include_str!("../templates/create-dto.ts.tpl");
const UPDATE_DTO_TEMPLATE: &str = include_str!("../templates/update-dto.ts.tpl");
const SERVICE_TEMPLATE: &str = include_str!("../templates/service.ts.tpl");
const SERVICE_IMPL_TEMPLATE: &str = include_str!("../templates/service-impl.ts.tpl");
const CONTROLLER_TEMPLATE: &str = include_str!("../templates/controller.ts.tpl");
const ROUTES_TEMPLATE: &str = include_str!("../templates/routes.ts.tpl");

/// Template renderer for artifact bodies.
pub struct TemplateRenderer {
    variable_pattern: Regex,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Create a new template renderer.
    pub fn new() -> Self {
        Self {
            // Match {{variable_name}} pattern
            variable_pattern: Regex::new(r"\{\{([a-zA-Z_][a-zA-Z0-9_]*)\}\}")
                .expect("placeholder pattern is a valid regex"),
        }
    }

    /// Raw template text for an artifact kind.
    pub fn template(kind: ArtifactKind) -> &'static str {
        match kind {
            ArtifactKind::Model => MODEL_TEMPLATE,
            ArtifactKind::CreateDto => CREATE_DTO_TEMPLATE,
            ArtifactKind::UpdateDto => UPDATE_DTO_TEMPLATE,
            ArtifactKind::ServiceInterface => SERVICE_TEMPLATE,
            ArtifactKind::ServiceImpl => SERVICE_IMPL_TEMPLATE,
            ArtifactKind::Controller => CONTROLLER_TEMPLATE,
            ArtifactKind::Routes => ROUTES_TEMPLATE,
        }
    }

    /// Render the body of one artifact.
    pub fn render(&self, kind: ArtifactKind, forms: &NameForms, owner_module: &str) -> String {
        let vars = Self::variables(forms, owner_module);
        self.render_content(Self::template(kind), &vars)
    }

    /// Render a descriptor for each requested kind, in the given order.
    pub fn describe(
        &self,
        resource: &ResourceSpec,
        source_root: &Path,
        kinds: &[ArtifactKind],
    ) -> Vec<ArtifactDescriptor> {
        let forms = resource.forms();
        let layout = ModuleLayout::new(source_root, resource.owner_module());

        kinds
            .iter()
            .map(|&kind| {
                debug!("Rendering {} for {}", kind, forms.pascal);
                ArtifactDescriptor {
                    kind,
                    target_path: layout.artifact_path(kind, &forms),
                    rendered_content: self.render(kind, &forms, resource.owner_module()),
                    barrel_directory: layout.directory(kind),
                    export_line: kind.export_line(&forms),
                }
            })
            .collect()
    }

    /// Render content by replacing variables. Unknown variables are kept verbatim.
    pub fn render_content(&self, content: &str, variables: &HashMap<String, String>) -> String {
        self.variable_pattern
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                variables
                    .get(var_name)
                    .cloned()
                    .unwrap_or_else(|| format!("{{{{{}}}}}", var_name))
            })
            .to_string()
    }

    fn variables(forms: &NameForms, owner_module: &str) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert("pascal".to_string(), forms.pascal.clone());
        vars.insert("camel".to_string(), forms.lower_camel.clone());
        vars.insert("kebab".to_string(), forms.kebab.clone());
        vars.insert("module".to_string(), owner_module.to_string());
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(kind: ArtifactKind) -> String {
        TemplateRenderer::new().render(kind, &NameForms::derive("Publisher"), "books")
    }

    #[test]
    fn test_render_content() {
        let renderer = TemplateRenderer::new();
        let mut vars = HashMap::new();
        vars.insert("pascal".to_string(), "Candy".to_string());

        let rendered = renderer.render_content("class {{pascal}} { {{missing}} }", &vars);
        assert_eq!(rendered, "class Candy { {{missing}} }");
    }

    #[test]
    fn test_every_placeholder_is_substituted() {
        for kind in ArtifactKind::all() {
            let body = render(kind);
            assert!(!body.contains("{{"), "{} left a placeholder", kind);
            assert!(body.contains("Publisher"), "{} lacks the type name", kind);
        }
    }

    #[test]
    fn test_model_exports_handle() {
        let body = render(ArtifactKind::Model);
        assert!(body.contains("const publisherSchema = new mongoose.Schema("));
        assert!(body.contains(
            "export const PublisherModel = mongoose.model('Publisher', publisherSchema);"
        ));
    }

    #[test]
    fn test_update_dto_derives_from_create_schema() {
        let create = render(ArtifactKind::CreateDto);
        let update = render(ArtifactKind::UpdateDto);

        assert!(create.contains("export const CreatePublisherSchema = z.object({});"));
        assert!(update.contains(
            "import { CreatePublisherSchema } from './create-publisher.dto';"
        ));
        assert!(update.contains("const UpdPublisherSchema = CreatePublisherSchema.partial();"));
        assert!(!update.contains("z.object"));
    }

    #[test]
    fn test_dtos_raise_validation_failures() {
        for kind in [ArtifactKind::CreateDto, ArtifactKind::UpdateDto] {
            let body = render(kind);
            assert!(body.contains("throw new InvalidArgumentError(errors);"));
        }
    }

    #[test]
    fn test_service_impl_uses_model_key_and_not_found() {
        let body = render(ArtifactKind::ServiceImpl);
        assert!(body.contains("export class PublisherServiceImpl implements PublisherService"));
        assert!(body.contains("private readonly publisherModel: typeof PublisherModel"));
        assert!(body.contains("throw new NotFoundError("));
        assert!(body.contains("from '@/books/dtos';"));
    }

    #[test]
    fn test_controller_depends_on_interface() {
        let body = render(ArtifactKind::Controller);
        assert!(body.contains("private readonly publisherService: PublisherService)"));
        assert!(!body.contains("ServiceImpl"));
        assert!(body.contains("handleRestExceptions(error, res);"));
    }

    #[test]
    fn test_routes_resolve_controller_by_key() {
        let body = render(ArtifactKind::Routes);
        assert!(body.contains(
            "diContainer.resolve<PublisherController>('publisherController')"
        ));
        assert!(!body.contains("new PublisherController"));
        assert!(body.contains("router.delete('/:id'"));
    }

    #[test]
    fn test_describe_orders_and_places_artifacts() {
        let resource = ResourceSpec::new("Candy", "candies").unwrap();
        let descriptors =
            TemplateRenderer::new().describe(&resource, Path::new("src"), &ArtifactKind::all());

        assert_eq!(descriptors.len(), 7);
        assert_eq!(descriptors[0].kind, ArtifactKind::Model);
        assert_eq!(
            descriptors[2].target_path,
            Path::new("src/candies/dtos/update-candy.dto.ts")
        );
        assert_eq!(
            descriptors[4].barrel_path(),
            Path::new("src/candies/services/index.ts")
        );
        assert_eq!(descriptors[6].export_line, "export * from './candy.routes';");
    }
}

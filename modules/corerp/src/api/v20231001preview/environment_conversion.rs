use std::collections::BTreeMap;

use armkit::conv::{ConversionError, VersionedModel};
use armkit_resource_id::ResourceId;

use super::API_VERSION;
use super::common::{ResourceEnvelope, compute_to_datamodel, compute_to_wire};
use super::environment::{
    BicepRecipeProperties, EnvironmentProperties, EnvironmentResource,
    RecipePropertiesClassification, TerraformRecipeProperties,
};
use super::extension::{extension_to_wire, extensions_to_datamodel};
use crate::datamodel::environment::{
    EnvironmentProperties as StoredProperties, EnvironmentRecipeProperties, RecipeTemplateKind,
};
use crate::datamodel::Environment;

impl VersionedModel<Environment> for EnvironmentResource {
    const API_VERSION: &'static str = API_VERSION;

    fn from_datamodel(model: &Environment) -> Self {
        let p = &model.properties;
        Self {
            envelope: ResourceEnvelope::from_base(&model.base),
            properties: EnvironmentProperties {
                compute: Some(compute_to_wire(&p.compute)),
                providers: (!p.providers.is_empty()).then(|| p.providers.clone()),
                recipes: p
                    .recipes
                    .iter()
                    .map(|(resource_type, recipes)| {
                        let recipes = recipes
                            .iter()
                            .map(|(name, recipe)| (name.clone(), recipe_to_wire(recipe)))
                            .collect();
                        (resource_type.clone(), recipes)
                    })
                    .collect(),
                extensions: p.extensions.iter().map(extension_to_wire).collect(),
                simulated: p.simulated.then_some(true),
                provisioning_state: Some(model.base.provisioning_state()),
            },
        }
    }

    fn to_datamodel(self, id: &ResourceId) -> Result<Environment, ConversionError> {
        let p = self.properties;
        let compute = p
            .compute
            .ok_or_else(|| ConversionError::validation("properties.compute", "is required"))?;

        let mut recipes = BTreeMap::new();
        for (resource_type, named) in p.recipes {
            let mut converted = BTreeMap::new();
            for (name, recipe) in named {
                let field = format!("properties.recipes['{resource_type}']['{name}']");
                converted.insert(name, recipe_to_datamodel(&field, recipe)?);
            }
            recipes.insert(resource_type, converted);
        }

        Ok(Environment {
            base: self.envelope.into_base(id),
            properties: StoredProperties {
                compute: compute_to_datamodel("properties.compute", compute)?,
                providers: p.providers.unwrap_or_default(),
                recipes,
                extensions: extensions_to_datamodel("properties.extensions", p.extensions)?,
                simulated: p.simulated.unwrap_or(false),
            },
        })
    }
}

fn recipe_to_wire(recipe: &EnvironmentRecipeProperties) -> RecipePropertiesClassification {
    match recipe.template_kind {
        RecipeTemplateKind::Bicep => BicepRecipeProperties {
            template_path: recipe.template_path.clone(),
            parameters: recipe.parameters.clone(),
            plain_http: recipe.plain_http.then_some(true),
        }
        .into(),
        RecipeTemplateKind::Terraform => TerraformRecipeProperties {
            template_path: recipe.template_path.clone(),
            parameters: recipe.parameters.clone(),
            template_version: recipe.template_version.clone(),
        }
        .into(),
    }
}

fn recipe_to_datamodel(
    field: &str,
    recipe: RecipePropertiesClassification,
) -> Result<EnvironmentRecipeProperties, ConversionError> {
    match recipe {
        RecipePropertiesClassification::Bicep(r) => Ok(EnvironmentRecipeProperties {
            template_kind: RecipeTemplateKind::Bicep,
            template_path: r.template_path,
            template_version: None,
            parameters: r.parameters,
            plain_http: r.plain_http.unwrap_or(false),
        }),
        RecipePropertiesClassification::Terraform(r) => Ok(EnvironmentRecipeProperties {
            template_kind: RecipeTemplateKind::Terraform,
            template_path: r.template_path,
            template_version: r.template_version,
            parameters: r.parameters,
            plain_http: false,
        }),
        other @ RecipePropertiesClassification::Base(_) => {
            Err(ConversionError::unsupported_variant(field, &other))
        }
    }
}

use serde_derive::{Deserialize, Serialize};

use crate::entities::{CategoryId, CustomCategory, Direction};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CustomCategoryModel {
    id: String,
    value: String,
    label: String,
    tipo: DirectionModel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_category: Option<String>,
    #[serde(default = "default_is_custom")]
    is_custom: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum DirectionModel {
    Entrada,
    Saida,
}

fn default_is_custom() -> bool {
    true
}

impl From<DirectionModel> for Direction {
    fn from(m: DirectionModel) -> Self {
        match m {
            DirectionModel::Entrada => Direction::Inflow,
            DirectionModel::Saida => Direction::Outflow,
        }
    }
}

impl From<Direction> for DirectionModel {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Inflow => DirectionModel::Entrada,
            Direction::Outflow => DirectionModel::Saida,
        }
    }
}

impl From<CustomCategoryModel> for CustomCategory {
    fn from(m: CustomCategoryModel) -> Self {
        CustomCategory {
            id: CategoryId(m.id),
            value: m.value,
            label: m.label,
            direction: m.tipo.into(),
            // Empty string is how the client clears the parent.
            parent_category: m.parent_category.filter(|p| !p.is_empty()).map(CategoryId),
            is_custom: m.is_custom,
        }
    }
}

impl From<&CustomCategory> for CustomCategoryModel {
    fn from(c: &CustomCategory) -> Self {
        CustomCategoryModel {
            id: c.id.0.clone(),
            value: c.value.clone(),
            label: c.label.clone(),
            tipo: c.direction.into(),
            parent_category: c.parent_category.as_ref().map(|p| p.0.clone()),
            is_custom: c.is_custom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_client_json() {
        let json = r#"[
            {"id":"custom-1-a","value":"saas","label":"SaaS","tipo":"saida","isCustom":true},
            {"id":"custom-2-b","value":"saas_infra","label":"Infra","tipo":"saida",
             "parentCategory":"custom-1-a","isCustom":true},
            {"id":"custom-3-c","value":"bonus","label":"Bônus","tipo":"entrada","parentCategory":""}
        ]"#;
        let categories: Vec<CustomCategory> = serde_json::from_str::<Vec<CustomCategoryModel>>(json)
            .unwrap()
            .into_iter()
            .map(Into::into)
            .collect();
        assert_eq!(categories[0].direction, Direction::Outflow);
        assert_eq!(categories[0].parent_category, None);
        assert_eq!(categories[1].parent_category, Some(CategoryId::new("custom-1-a")));
        assert_eq!(categories[2].direction, Direction::Inflow);
        assert_eq!(categories[2].parent_category, None);
        assert!(categories[2].is_custom);
    }
}

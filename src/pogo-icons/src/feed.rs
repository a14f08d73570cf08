//! Game master document model
//!
//! Only the parts of the game master this tool needs are modelled: the
//! `FORMS_V####` and `TEMPORARY_EVOLUTION_V####` templates and, inside them,
//! each variant's identifier and asset bundle value.

use serde::Deserialize;

use crate::extract::Separator;
use crate::Result;

/// Which physical art a variant uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetBundleValue {
    /// Bundle index, rendered as `<id>_<2 digits>`
    Index(u32),
    /// Fully qualified suffix
    Suffix(String),
}

/// One form or temporary evolution listed for a species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantEntry {
    /// Feed token, e.g. `VENUSAUR_NORMAL` or `TEMP_EVOLUTION_MEGA`
    pub token: String,
    pub value: AssetBundleValue,
}

impl VariantEntry {
    pub fn new(token: impl Into<String>, value: AssetBundleValue) -> Self {
        Self {
            token: token.into(),
            value,
        }
    }
}

/// Template families the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Forms,
    TemporaryEvolution,
}

impl TemplateKind {
    pub fn prefix(self) -> &'static str {
        match self {
            TemplateKind::Forms => "FORMS_V",
            TemplateKind::TemporaryEvolution => "TEMPORARY_EVOLUTION_V",
        }
    }

    pub fn separator(self) -> Separator {
        match self {
            TemplateKind::Forms => Separator::Form,
            TemplateKind::TemporaryEvolution => Separator::TemporaryEvolution,
        }
    }

    fn from_template_id(template_id: &str) -> Option<Self> {
        [TemplateKind::Forms, TemplateKind::TemporaryEvolution]
            .into_iter()
            .find(|kind| template_id.starts_with(kind.prefix()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVariant {
    #[serde(default, alias = "temporaryEvolutionId")]
    form: String,
    #[serde(default)]
    asset_bundle_value: Option<u32>,
    #[serde(default)]
    asset_bundle_suffix: Option<String>,
}

impl RawVariant {
    fn to_entry(&self) -> VariantEntry {
        let value = match (&self.asset_bundle_suffix, self.asset_bundle_value) {
            (Some(suffix), _) if !suffix.is_empty() => AssetBundleValue::Suffix(suffix.clone()),
            (_, Some(index)) => AssetBundleValue::Index(index),
            _ => AssetBundleValue::Index(0),
        };
        VariantEntry::new(self.form.clone(), value)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct FormSettings {
    #[serde(default)]
    forms: Option<Vec<RawVariant>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TemporaryEvolutionSettings {
    #[serde(default)]
    temporary_evolutions: Option<Vec<RawVariant>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TemplateData {
    #[serde(default)]
    form_settings: Option<FormSettings>,
    #[serde(default)]
    temporary_evolution_settings: Option<TemporaryEvolutionSettings>,
}

/// One game master template.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub template_id: String,
    #[serde(default)]
    data: TemplateData,
}

impl Template {
    pub fn kind(&self) -> Option<TemplateKind> {
        TemplateKind::from_template_id(&self.template_id)
    }

    /// Species id from the 4 digits after the template prefix.
    ///
    /// Returns `None` when the digits are missing or parse to zero.
    pub fn species_id(&self) -> Option<u16> {
        let kind = self.kind()?;
        let rest = &self.template_id[kind.prefix().len()..];
        let digits: String = rest
            .chars()
            .take(4)
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse::<u16>().ok().filter(|id| *id != 0)
    }

    /// Listed variants in feed order, or `None` if the template has no list.
    pub fn variants(&self) -> Option<Vec<VariantEntry>> {
        let raw = match self.kind()? {
            TemplateKind::Forms => self.data.form_settings.as_ref()?.forms.as_ref()?,
            TemplateKind::TemporaryEvolution => self
                .data
                .temporary_evolution_settings
                .as_ref()?
                .temporary_evolutions
                .as_ref()?,
        };
        Some(raw.iter().map(RawVariant::to_entry).collect())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    List(Vec<Template>),
    Wrapped {
        #[serde(alias = "itemTemplates")]
        template: Vec<Template>,
    },
}

/// Parsed game master.
#[derive(Debug, Clone, Default)]
pub struct GameMaster {
    pub templates: Vec<Template>,
}

impl GameMaster {
    /// Parse either a bare template array or an object with a `template`
    /// (or `itemTemplates`) array.
    pub fn from_json(text: &str) -> Result<Self> {
        let templates = match serde_json::from_str(text)? {
            Document::List(templates) => templates,
            Document::Wrapped { template } => template,
        };
        Ok(Self { templates })
    }
}

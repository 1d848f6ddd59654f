use serde::{Deserialize, Serialize};

/// The seven fixed module tags. The tag selects which prompt template,
/// data shape and validator applies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum CvModule {
    BasicInfo,
    Education,
    Working,
    Project,
    Publications,
    Leadership,
    Skills,
}

impl CvModule {
    /// List-shaped modules carry an `items` array of structured entries.
    pub fn is_list(self) -> bool {
        matches!(
            self,
            CvModule::Education
                | CvModule::Working
                | CvModule::Project
                | CvModule::Publications
                | CvModule::Leadership
        )
    }
}

// Field shapes mirror the client's editing forms. Required string fields
// default to empty and are flagged by the completeness check rather than
// failing deserialization, so partially-extracted data survives the trip
// back to the user for correction.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasicInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationItem {
    pub degree: String,
    pub school: String,
    pub major: String,
    pub period: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub honors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relevant_coursework: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub items: Vec<EducationItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkingItem {
    pub company: String,
    pub position: String,
    pub period: String,
    pub location: String,
    pub responsibilities: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Working {
    pub items: Vec<WorkingItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectItem {
    pub name: String,
    pub period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub description: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub items: Vec<ProjectItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PublicationItem {
    pub title: String,
    pub authors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Publications {
    pub items: Vec<PublicationItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadershipItem {
    pub title: String,
    pub organization: String,
    pub period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Leadership {
    pub items: Vec<LeadershipItem>,
}

/// Skills are three refined free-text summaries, not a list module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub languages: String,
    pub skills: String,
    pub interests: String,
}

/// One of the seven module shapes, selected by its tag. Serializes as the
/// bare inner shape (the tag travels separately in requests/responses).
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ModuleData {
    BasicInfo(BasicInfo),
    Education(Education),
    Working(Working),
    Project(Project),
    Publications(Publications),
    Leadership(Leadership),
    Skills(Skills),
}

impl ModuleData {
    /// Deserializes a payload into the shape the tag selects. Type-level
    /// mismatches (e.g. `items` holding a string) are errors; missing fields
    /// are not — they default and surface through the completeness check.
    pub fn from_tagged(
        module: CvModule,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(match module {
            CvModule::BasicInfo => ModuleData::BasicInfo(serde_json::from_value(value)?),
            CvModule::Education => ModuleData::Education(serde_json::from_value(value)?),
            CvModule::Working => ModuleData::Working(serde_json::from_value(value)?),
            CvModule::Project => ModuleData::Project(serde_json::from_value(value)?),
            CvModule::Publications => ModuleData::Publications(serde_json::from_value(value)?),
            CvModule::Leadership => ModuleData::Leadership(serde_json::from_value(value)?),
            CvModule::Skills => ModuleData::Skills(serde_json::from_value(value)?),
        })
    }

    pub fn module(&self) -> CvModule {
        match self {
            ModuleData::BasicInfo(_) => CvModule::BasicInfo,
            ModuleData::Education(_) => CvModule::Education,
            ModuleData::Working(_) => CvModule::Working,
            ModuleData::Project(_) => CvModule::Project,
            ModuleData::Publications(_) => CvModule::Publications,
            ModuleData::Leadership(_) => CvModule::Leadership,
            ModuleData::Skills(_) => CvModule::Skills,
        }
    }
}

/// A derived pass/fail plus missing-field list, computed freshly from a
/// module's current data. Never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessCheck {
    pub is_complete: bool,
    pub missing_fields: Vec<MissingField>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MissingField {
    pub field: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn module_tags_use_camel_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&CvModule::BasicInfo).unwrap(),
            "\"basicInfo\""
        );
        assert_eq!(
            serde_json::from_str::<CvModule>("\"publications\"").unwrap(),
            CvModule::Publications
        );
    }

    #[test]
    fn from_tagged_tolerates_missing_fields() {
        let data = ModuleData::from_tagged(
            CvModule::Education,
            json!({"items": [{"school": "CUHK"}]}),
        )
        .unwrap();
        match data {
            ModuleData::Education(e) => {
                assert_eq!(e.items[0].school, "CUHK");
                assert_eq!(e.items[0].degree, "");
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn from_tagged_rejects_type_mismatches() {
        assert!(ModuleData::from_tagged(CvModule::Education, json!({"items": "nope"})).is_err());
        assert!(ModuleData::from_tagged(CvModule::BasicInfo, json!({"name": 42})).is_err());
    }

    #[test]
    fn module_data_serializes_untagged() {
        let data = ModuleData::Skills(Skills {
            languages: "English, Cantonese".into(),
            skills: "Rust, SQL".into(),
            interests: "Climbing".into(),
        });
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["languages"], "English, Cantonese");
        assert!(value.get("items").is_none());
    }
}

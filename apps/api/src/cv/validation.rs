//! Per-module completeness validation.
//!
//! Each module defines a fixed set of required fields; validation produces
//! `(field path, localized message)` pairs and a module is complete iff that
//! list is empty. Incompleteness is data, not an error — this function never
//! fails. Suggestions stay programmatic; no LLM round-trip here.

use crate::cv::models::{
    BasicInfo, CompletenessCheck, Education, Leadership, MissingField, ModuleData, Project,
    Publications, Skills, Working,
};
use crate::lang::Lang;

pub fn check_completeness(data: &ModuleData, lang: Lang) -> CompletenessCheck {
    let missing_fields = match data {
        ModuleData::BasicInfo(d) => validate_basic_info(d, lang),
        ModuleData::Education(d) => validate_education(d, lang),
        ModuleData::Working(d) => validate_working(d, lang),
        ModuleData::Project(d) => validate_project(d, lang),
        ModuleData::Publications(d) => validate_publications(d, lang),
        ModuleData::Leadership(d) => validate_leadership(d, lang),
        ModuleData::Skills(d) => validate_skills(d, lang),
    };

    CompletenessCheck {
        is_complete: missing_fields.is_empty(),
        missing_fields,
        suggestions: Vec::new(),
    }
}

fn missing(field: impl Into<String>, lang: Lang, en: &str, zh: &str) -> MissingField {
    MissingField {
        field: field.into(),
        message: lang.pick(en, zh).to_string(),
    }
}

fn validate_basic_info(d: &BasicInfo, lang: Lang) -> Vec<MissingField> {
    let mut out = Vec::new();
    if d.name.is_empty() {
        out.push(missing("name", lang, "Name is required", "姓名是必需的"));
    }
    if d.phone.is_empty() {
        out.push(missing("phone", lang, "Phone is required", "电话是必需的"));
    }
    if d.email.is_empty() {
        out.push(missing("email", lang, "Email is required", "邮件是必需的"));
    }
    out
}

fn validate_education(d: &Education, lang: Lang) -> Vec<MissingField> {
    if d.items.is_empty() {
        return vec![missing(
            "items",
            lang,
            "At least one education record is required",
            "至少需要一条教育背景记录",
        )];
    }
    let mut out = Vec::new();
    for (i, item) in d.items.iter().enumerate() {
        if item.degree.is_empty() {
            out.push(missing(
                format!("items[{i}].degree"),
                lang,
                "Degree is required",
                "学位是必需的",
            ));
        }
        if item.school.is_empty() {
            out.push(missing(
                format!("items[{i}].school"),
                lang,
                "School is required",
                "学校是必需的",
            ));
        }
        if item.major.is_empty() {
            out.push(missing(
                format!("items[{i}].major"),
                lang,
                "Major is required",
                "专业是必需的",
            ));
        }
        if item.period.is_empty() {
            out.push(missing(
                format!("items[{i}].period"),
                lang,
                "Period is required",
                "时间是必需的",
            ));
        }
        if item.location.is_empty() {
            out.push(missing(
                format!("items[{i}].location"),
                lang,
                "Location is required",
                "地点是必需的",
            ));
        }
    }
    out
}

fn validate_working(d: &Working, lang: Lang) -> Vec<MissingField> {
    if d.items.is_empty() {
        return vec![missing(
            "items",
            lang,
            "At least one work experience record is required",
            "至少需要一条工作经历记录",
        )];
    }
    let mut out = Vec::new();
    for (i, item) in d.items.iter().enumerate() {
        if item.company.is_empty() {
            out.push(missing(
                format!("items[{i}].company"),
                lang,
                "Company is required",
                "公司是必需的",
            ));
        }
        if item.position.is_empty() {
            out.push(missing(
                format!("items[{i}].position"),
                lang,
                "Position is required",
                "职位是必需的",
            ));
        }
        if item.period.is_empty() {
            out.push(missing(
                format!("items[{i}].period"),
                lang,
                "Period is required",
                "时间是必需的",
            ));
        }
        if item.location.is_empty() {
            out.push(missing(
                format!("items[{i}].location"),
                lang,
                "Location is required",
                "地点是必需的",
            ));
        }
        if item.responsibilities.is_empty() {
            out.push(missing(
                format!("items[{i}].responsibilities"),
                lang,
                "At least one responsibility is required",
                "至少需要一条职责描述",
            ));
        }
    }
    out
}

fn validate_project(d: &Project, lang: Lang) -> Vec<MissingField> {
    if d.items.is_empty() {
        return vec![missing(
            "items",
            lang,
            "At least one project record is required",
            "至少需要一条项目经历记录",
        )];
    }
    let mut out = Vec::new();
    for (i, item) in d.items.iter().enumerate() {
        if item.name.is_empty() {
            out.push(missing(
                format!("items[{i}].name"),
                lang,
                "Project name is required",
                "项目名称是必需的",
            ));
        }
        if item.period.is_empty() {
            out.push(missing(
                format!("items[{i}].period"),
                lang,
                "Period is required",
                "时间是必需的",
            ));
        }
        if item.description.is_empty() {
            out.push(missing(
                format!("items[{i}].description"),
                lang,
                "At least one description is required",
                "至少需要一条项目描述",
            ));
        }
    }
    out
}

fn validate_publications(d: &Publications, lang: Lang) -> Vec<MissingField> {
    if d.items.is_empty() {
        return vec![missing(
            "items",
            lang,
            "At least one publication record is required",
            "至少需要一条论文记录",
        )];
    }
    let mut out = Vec::new();
    for (i, item) in d.items.iter().enumerate() {
        if item.title.is_empty() {
            out.push(missing(
                format!("items[{i}].title"),
                lang,
                "Title is required",
                "论文标题是必需的",
            ));
        }
        if item.authors.is_empty() {
            out.push(missing(
                format!("items[{i}].authors"),
                lang,
                "At least one author is required",
                "至少需要一位作者",
            ));
        }
        if item.year.is_empty() {
            out.push(missing(
                format!("items[{i}].year"),
                lang,
                "Year is required",
                "年份是必需的",
            ));
        }
    }
    out
}

fn validate_leadership(d: &Leadership, lang: Lang) -> Vec<MissingField> {
    if d.items.is_empty() {
        return vec![missing(
            "items",
            lang,
            "At least one leadership record is required",
            "至少需要一条领导经验记录",
        )];
    }
    let mut out = Vec::new();
    for (i, item) in d.items.iter().enumerate() {
        if item.title.is_empty() {
            out.push(missing(
                format!("items[{i}].title"),
                lang,
                "Title is required",
                "职位/活动名称是必需的",
            ));
        }
        if item.organization.is_empty() {
            out.push(missing(
                format!("items[{i}].organization"),
                lang,
                "Organization is required",
                "组织是必需的",
            ));
        }
        if item.period.is_empty() {
            out.push(missing(
                format!("items[{i}].period"),
                lang,
                "Period is required",
                "时间是必需的",
            ));
        }
        if item.description.is_empty() {
            out.push(missing(
                format!("items[{i}].description"),
                lang,
                "At least one description is required",
                "至少需要一条描述",
            ));
        }
    }
    out
}

fn validate_skills(d: &Skills, lang: Lang) -> Vec<MissingField> {
    let mut out = Vec::new();
    if d.languages.is_empty() {
        out.push(missing(
            "languages",
            lang,
            "Languages is required",
            "语言是必需的",
        ));
    }
    if d.skills.is_empty() {
        out.push(missing(
            "skills",
            lang,
            "Skills is required",
            "技能是必需的",
        ));
    }
    if d.interests.is_empty() {
        out.push(missing(
            "interests",
            lang,
            "Interests is required",
            "兴趣是必需的",
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::models::{
        EducationItem, LeadershipItem, ProjectItem, PublicationItem, WorkingItem,
    };

    fn fields(check: &CompletenessCheck) -> Vec<&str> {
        check
            .missing_fields
            .iter()
            .map(|m| m.field.as_str())
            .collect()
    }

    fn complete_education_item() -> EducationItem {
        EducationItem {
            degree: "Bachelor of Science".into(),
            school: "CUHK".into(),
            major: "Computer Science".into(),
            period: "Sep 2019 - Jul 2023".into(),
            location: "Hong Kong".into(),
            ..Default::default()
        }
    }

    #[test]
    fn basic_info_flags_each_missing_required_field() {
        let data = ModuleData::BasicInfo(BasicInfo {
            name: "Robert".into(),
            ..Default::default()
        });
        let check = check_completeness(&data, Lang::En);
        assert!(!check.is_complete);
        assert_eq!(fields(&check), vec!["phone", "email"]);
    }

    #[test]
    fn basic_info_complete_when_required_fields_present() {
        let data = ModuleData::BasicInfo(BasicInfo {
            name: "Robert".into(),
            phone: "5950 4201".into(),
            email: "robert@example.com".into(),
            ..Default::default()
        });
        let check = check_completeness(&data, Lang::En);
        assert!(check.is_complete);
        assert!(check.missing_fields.is_empty());
    }

    #[test]
    fn empty_list_is_a_dedicated_violation() {
        let data = ModuleData::Education(Education { items: vec![] });
        let check = check_completeness(&data, Lang::En);
        assert!(!check.is_complete);
        assert_eq!(fields(&check), vec!["items"]);
        assert!(check.missing_fields[0].message.contains("At least one"));
    }

    #[test]
    fn education_field_path_points_at_the_offending_item() {
        let mut second = complete_education_item();
        second.degree = String::new();
        let data = ModuleData::Education(Education {
            items: vec![complete_education_item(), second],
        });
        let check = check_completeness(&data, Lang::En);
        assert!(!check.is_complete);
        assert_eq!(fields(&check), vec!["items[1].degree"]);
    }

    #[test]
    fn education_complete_items_pass() {
        let data = ModuleData::Education(Education {
            items: vec![complete_education_item()],
        });
        assert!(check_completeness(&data, Lang::En).is_complete);
    }

    #[test]
    fn working_requires_at_least_one_responsibility() {
        let data = ModuleData::Working(Working {
            items: vec![WorkingItem {
                company: "Acme".into(),
                position: "Engineer".into(),
                period: "2022 - 2024".into(),
                location: "Shenzhen".into(),
                responsibilities: vec![],
                ..Default::default()
            }],
        });
        let check = check_completeness(&data, Lang::En);
        assert_eq!(fields(&check), vec!["items[0].responsibilities"]);
    }

    #[test]
    fn project_requires_name_period_description() {
        let data = ModuleData::Project(Project {
            items: vec![ProjectItem::default()],
        });
        let check = check_completeness(&data, Lang::En);
        assert_eq!(
            fields(&check),
            vec!["items[0].name", "items[0].period", "items[0].description"]
        );
    }

    #[test]
    fn publications_require_title_authors_year() {
        let data = ModuleData::Publications(Publications {
            items: vec![PublicationItem {
                title: "A Study".into(),
                ..Default::default()
            }],
        });
        let check = check_completeness(&data, Lang::En);
        assert_eq!(fields(&check), vec!["items[0].authors", "items[0].year"]);
    }

    #[test]
    fn leadership_requires_title_org_period_description() {
        let data = ModuleData::Leadership(Leadership {
            items: vec![LeadershipItem {
                title: "President".into(),
                organization: "Robotics Society".into(),
                period: "2021 - 2022".into(),
                description: vec!["Led 12 members".into()],
                location: None,
            }],
        });
        assert!(check_completeness(&data, Lang::En).is_complete);
    }

    #[test]
    fn skills_requires_all_three_summaries() {
        let data = ModuleData::Skills(Skills {
            languages: "English".into(),
            ..Default::default()
        });
        let check = check_completeness(&data, Lang::En);
        assert_eq!(fields(&check), vec!["skills", "interests"]);
    }

    #[test]
    fn messages_localize_to_chinese() {
        let data = ModuleData::BasicInfo(BasicInfo::default());
        let check = check_completeness(&data, Lang::Zh);
        assert_eq!(check.missing_fields[0].message, "姓名是必需的");
    }

    #[test]
    fn validation_never_suggests_llm_output() {
        let data = ModuleData::Education(Education { items: vec![] });
        assert!(check_completeness(&data, Lang::En).suggestions.is_empty());
    }
}

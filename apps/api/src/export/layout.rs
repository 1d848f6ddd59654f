//! Shared per-module layout step.
//!
//! Both exporters consume the same flat list of abstract layout blocks, so
//! the per-module field layout is derived exactly once. The renderers only
//! decide how a block looks in their own format.

use crate::cv::models::{CvModule, ModuleData};
use crate::lang::Lang;

/// One abstract layout instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Section heading with an underline rule.
    SectionHeading(String),
    /// Centered identity lines; `large` marks the name line.
    CenteredLine {
        text: String,
        bold: bool,
        large: bool,
    },
    /// Two-column line: left text flush left, right text at a right-aligned
    /// tab stop.
    SplitLine {
        left: String,
        right: String,
        left_bold: bool,
        right_bold: bool,
    },
    /// Plain body paragraph.
    Plain(String),
    /// Bulleted line with a hanging indent.
    Bullet(String),
    /// Inter-entry spacing.
    Gap,
}

pub fn section_label(module: CvModule, lang: Lang) -> &'static str {
    match module {
        CvModule::BasicInfo => lang.pick("BASIC INFORMATION", "基本信息"),
        CvModule::Education => lang.pick("EDUCATION", "教育背景"),
        CvModule::Working => lang.pick("WORKING EXPERIENCE", "工作经历"),
        CvModule::Project => lang.pick("PROJECT EXPERIENCE", "项目经历"),
        CvModule::Publications => lang.pick("PAPER PUBLICATION", "论文发表"),
        CvModule::Leadership => {
            lang.pick("LEADERSHIP EXPERIENCE/ OTHER ACHIEVEMENTS", "其他/领导经验")
        }
        CvModule::Skills => lang.pick("LANGUAGES, SKILLS & INTERESTS", "技能"),
    }
}

/// Lays out the assembled module set. Basic info renders first when present
/// (as a centered identity block with no section heading); the remaining
/// modules follow in the given order, each under its localized heading.
pub fn layout_modules(modules: &[(CvModule, ModuleData)], lang: Lang) -> Vec<Block> {
    let mut blocks = Vec::new();

    if let Some((_, ModuleData::BasicInfo(info))) = modules
        .iter()
        .find(|(module, _)| *module == CvModule::BasicInfo)
    {
        layout_basic_info(&mut blocks, info);
    }

    for (module, data) in modules {
        if *module == CvModule::BasicInfo {
            continue;
        }
        blocks.push(Block::SectionHeading(section_label(*module, lang).to_string()));
        match data {
            ModuleData::BasicInfo(_) => {}
            ModuleData::Education(d) => layout_education(&mut blocks, d, lang),
            ModuleData::Working(d) => layout_working(&mut blocks, d),
            ModuleData::Project(d) => layout_project(&mut blocks, d, lang),
            ModuleData::Publications(d) => layout_publications(&mut blocks, d),
            ModuleData::Leadership(d) => layout_leadership(&mut blocks, d),
            ModuleData::Skills(d) => layout_skills(&mut blocks, d),
        }
        blocks.push(Block::Gap);
    }

    blocks
}

fn layout_basic_info(blocks: &mut Vec<Block>, info: &crate::cv::models::BasicInfo) {
    blocks.push(Block::CenteredLine {
        text: info.name.clone(),
        bold: true,
        large: true,
    });

    let mut contact = Vec::new();
    if !info.phone.is_empty() {
        contact.push(info.phone.clone());
    }
    if !info.email.is_empty() {
        contact.push(info.email.clone());
    }
    if !contact.is_empty() {
        blocks.push(Block::CenteredLine {
            text: contact.join(" | "),
            bold: false,
            large: false,
        });
    }

    let mut links = Vec::new();
    if let Some(linkedin) = &info.linkedin {
        links.push(format!("LinkedIn: {linkedin}"));
    }
    if let Some(github) = &info.github {
        links.push(format!("GitHub: {github}"));
    }
    if !links.is_empty() {
        blocks.push(Block::CenteredLine {
            text: links.join(" | "),
            bold: false,
            large: false,
        });
    }

    blocks.push(Block::Gap);
}

fn layout_education(blocks: &mut Vec<Block>, data: &crate::cv::models::Education, lang: Lang) {
    for item in &data.items {
        blocks.push(Block::SplitLine {
            left: item.school.clone(),
            right: item.location.clone(),
            left_bold: true,
            right_bold: true,
        });
        blocks.push(Block::SplitLine {
            left: item.degree.clone(),
            right: item.period.clone(),
            left_bold: true,
            right_bold: false,
        });
        if !item.major.is_empty() {
            blocks.push(Block::Plain(item.major.clone()));
        }
        if let Some(gpa) = &item.gpa {
            blocks.push(Block::Bullet(format!("GPA: {gpa}")));
        }
        if !item.honors.is_empty() {
            blocks.push(Block::Bullet(format!(
                "{}{}",
                lang.pick("Honors: ", "荣誉: "),
                item.honors.join(", ")
            )));
        }
        if !item.relevant_coursework.is_empty() {
            blocks.push(Block::Bullet(format!(
                "{}{}",
                lang.pick("Relevant coursework: ", "相关课程: "),
                item.relevant_coursework.join(", ")
            )));
        }
        blocks.push(Block::Gap);
    }
}

fn layout_working(blocks: &mut Vec<Block>, data: &crate::cv::models::Working) {
    for item in &data.items {
        blocks.push(Block::SplitLine {
            left: item.company.clone(),
            right: item.location.clone(),
            left_bold: true,
            right_bold: false,
        });
        blocks.push(Block::SplitLine {
            left: item.position.clone(),
            right: item.period.clone(),
            left_bold: true,
            right_bold: false,
        });
        for resp in &item.responsibilities {
            blocks.push(Block::Bullet(resp.clone()));
        }
        for achievement in &item.achievements {
            blocks.push(Block::Bullet(achievement.clone()));
        }
        blocks.push(Block::Gap);
    }
}

fn layout_project(blocks: &mut Vec<Block>, data: &crate::cv::models::Project, lang: Lang) {
    for item in &data.items {
        blocks.push(Block::SplitLine {
            left: item.name.clone(),
            right: item.period.clone(),
            left_bold: true,
            right_bold: false,
        });
        if let Some(role) = &item.role {
            blocks.push(Block::Plain(role.clone()));
        }
        for desc in &item.description {
            blocks.push(Block::Bullet(desc.clone()));
        }
        if !item.technologies.is_empty() {
            blocks.push(Block::Plain(format!(
                "{}{}",
                lang.pick("Technologies: ", "技术栈: "),
                item.technologies.join(", ")
            )));
        }
        blocks.push(Block::Gap);
    }
}

fn layout_publications(blocks: &mut Vec<Block>, data: &crate::cv::models::Publications) {
    for item in &data.items {
        blocks.push(Block::SplitLine {
            left: item.title.clone(),
            right: item.year.clone(),
            left_bold: true,
            right_bold: false,
        });

        let mut details = Vec::new();
        if !item.authors.is_empty() {
            details.push(item.authors.join(", "));
        }
        if let Some(journal) = &item.journal {
            details.push(journal.clone());
        }
        if !item.year.is_empty() {
            details.push(item.year.clone());
        }
        if !details.is_empty() {
            blocks.push(Block::Plain(details.join(" • ")));
        }

        let mut extra = Vec::new();
        if let Some(doi) = &item.doi {
            extra.push(format!("DOI: {doi}"));
        }
        if let Some(status) = &item.status {
            extra.push(status.clone());
        }
        if !extra.is_empty() {
            blocks.push(Block::Plain(extra.join(" • ")));
        }

        blocks.push(Block::Gap);
    }
}

fn layout_leadership(blocks: &mut Vec<Block>, data: &crate::cv::models::Leadership) {
    for item in &data.items {
        blocks.push(Block::SplitLine {
            left: item.organization.clone(),
            right: item.location.clone().unwrap_or_default(),
            left_bold: true,
            right_bold: false,
        });
        blocks.push(Block::SplitLine {
            left: item.title.clone(),
            right: item.period.clone(),
            left_bold: true,
            right_bold: false,
        });
        for desc in &item.description {
            blocks.push(Block::Bullet(desc.clone()));
        }
        blocks.push(Block::Gap);
    }
}

fn layout_skills(blocks: &mut Vec<Block>, data: &crate::cv::models::Skills) {
    if !data.languages.is_empty() {
        blocks.push(Block::Bullet(data.languages.clone()));
    }
    if !data.skills.is_empty() {
        blocks.push(Block::Bullet(data.skills.clone()));
    }
    if !data.interests.is_empty() {
        blocks.push(Block::Bullet(data.interests.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::models::{BasicInfo, Education, EducationItem, Skills};

    fn basic_info() -> (CvModule, ModuleData) {
        (
            CvModule::BasicInfo,
            ModuleData::BasicInfo(BasicInfo {
                name: "JIANG, Yanze Robert".into(),
                phone: "5950 4201".into(),
                email: "robert@example.com".into(),
                linkedin: Some("linkedin.com/in/yanze-jiang".into()),
                github: None,
            }),
        )
    }

    fn skills() -> (CvModule, ModuleData) {
        (
            CvModule::Skills,
            ModuleData::Skills(Skills {
                languages: "English, Cantonese, Mandarin".into(),
                skills: "Rust, SQL, Python".into(),
                interests: "Hiking".into(),
            }),
        )
    }

    #[test]
    fn basic_info_renders_first_without_a_heading() {
        let blocks = layout_modules(&[basic_info(), skills()], Lang::En);
        match &blocks[0] {
            Block::CenteredLine { text, bold, large } => {
                assert_eq!(text, "JIANG, Yanze Robert");
                assert!(*bold && *large);
            }
            other => panic!("expected centered name, got {other:?}"),
        }
        // The first heading belongs to the skills module, not basic info.
        let first_heading = blocks.iter().find_map(|b| match b {
            Block::SectionHeading(label) => Some(label.clone()),
            _ => None,
        });
        assert_eq!(first_heading.as_deref(), Some("LANGUAGES, SKILLS & INTERESTS"));
    }

    #[test]
    fn omitting_basic_info_starts_with_the_first_module_heading() {
        let blocks = layout_modules(&[skills()], Lang::En);
        assert_eq!(
            blocks[0],
            Block::SectionHeading("LANGUAGES, SKILLS & INTERESTS".into())
        );
    }

    #[test]
    fn contact_and_links_are_pipe_joined() {
        let blocks = layout_modules(&[basic_info()], Lang::En);
        assert_eq!(
            blocks[1],
            Block::CenteredLine {
                text: "5950 4201 | robert@example.com".into(),
                bold: false,
                large: false,
            }
        );
        assert_eq!(
            blocks[2],
            Block::CenteredLine {
                text: "LinkedIn: linkedin.com/in/yanze-jiang".into(),
                bold: false,
                large: false,
            }
        );
    }

    #[test]
    fn education_produces_split_lines_and_labeled_bullets() {
        let data = ModuleData::Education(Education {
            items: vec![EducationItem {
                degree: "BSc".into(),
                school: "CUHK".into(),
                major: "Computer Science".into(),
                period: "2019 - 2023".into(),
                location: "Hong Kong".into(),
                gpa: Some("3.83/4.00".into()),
                honors: vec!["Dean's List".into(), "Scholarship".into()],
                ..Default::default()
            }],
        });
        let blocks = layout_modules(&[(CvModule::Education, data)], Lang::En);
        assert_eq!(
            blocks[1],
            Block::SplitLine {
                left: "CUHK".into(),
                right: "Hong Kong".into(),
                left_bold: true,
                right_bold: true,
            }
        );
        assert!(blocks.contains(&Block::Bullet("GPA: 3.83/4.00".into())));
        assert!(blocks.contains(&Block::Bullet("Honors: Dean's List, Scholarship".into())));
    }

    #[test]
    fn section_labels_localize() {
        assert_eq!(section_label(CvModule::Education, Lang::Zh), "教育背景");
        assert_eq!(section_label(CvModule::Working, Lang::En), "WORKING EXPERIENCE");
    }
}

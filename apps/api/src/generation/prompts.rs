//! Prompt builders for the free-text generation tasks.

use crate::lang::Lang;

pub struct PolishInput<'a> {
    pub description: &'a str,
    pub target_job_description: Option<&'a str>,
    pub bullet_points: u8,
    pub special_requirements: Option<&'a str>,
}

pub struct CoverLetterInput<'a> {
    pub job_description: &'a str,
    pub resume_content: &'a str,
    pub special_requirements: Option<&'a str>,
}

pub struct ModifyCoverLetterInput<'a> {
    pub job_description: &'a str,
    pub resume_content: &'a str,
    pub current_cover_letter: &'a str,
    pub modification_requirement: &'a str,
}

/// Project-polish prompt: labeled name/period/role sections plus a fixed
/// number of bullet points, the last one summarizing skills and outputs.
pub fn polish_prompts(input: &PolishInput, lang: Lang) -> (String, String) {
    let system = lang
        .pick(
            "You are a professional project description polishing assistant. Please polish the \
             project description based on the user's information and output in the specified format.",
            "你是一个专业的项目描述润色助手。请根据用户提供的信息，润色项目描述并按照指定格式输出。",
        )
        .to_string();

    let mut user = lang
        .pick(
            "Please polish the following project description and output in the specified format:\n\n",
            "请根据以下信息润色项目描述，并按照指定格式输出：\n\n",
        )
        .to_string();

    if let Some(reqs) = input.special_requirements.filter(|r| !r.trim().is_empty()) {
        user.push_str(&format!(
            "{}{}\n\n",
            lang.pick("Special Requirements: ", "特别要求："),
            reqs
        ));
    }

    user.push_str(&format!(
        "{}\n{}\n\n",
        lang.pick("Project Description:", "项目描述："),
        input.description
    ));

    if let Some(jd) = input.target_job_description.filter(|j| !j.trim().is_empty()) {
        user.push_str(&format!(
            "{}\n{}\n\n",
            lang.pick("Target Job Description:", "目标职位描述："),
            jd
        ));
    }

    let n = input.bullet_points;
    if lang.is_zh() {
        user.push_str(&format!(
            "请严格按照以下结构化格式输出（使用{n}个要点，最后一个要点要总结锻炼的技能、能力和产出）：\n\n\
             **项目名称：** [项目标题]\n\n\
             **项目时间：** [项目时间日期]\n\n\
             **用户角色：** [用户角色，如果适用]\n\n\
             **项目要点：**\n\
             - [要点1]\n\
             - [要点2]\n\
             - ...\n\
             - [要点{n}：总结锻炼了什么技能、什么能力、有什么产出]\n\n\
             重要：必须使用上述格式，每个部分都要有明确的标签（**项目名称：**、**项目时间：**、**用户角色：**、**项目要点：**），要点使用 - 符号开头。"
        ));
    } else {
        user.push_str(&format!(
            "Please output strictly in the following structured format (use {n} bullet points, \
             the last one should summarize skills, abilities, and outputs):\n\n\
             **Project Name:** [Project Title]\n\n\
             **Project Period:** [Project Date/Time]\n\n\
             **User Role:** [User Role, if applicable]\n\n\
             **Project Highlights:**\n\
             - [Point 1]\n\
             - [Point 2]\n\
             - ...\n\
             - [Point {n}: Summary of skills developed, abilities gained, and outputs/deliverables]\n\n\
             Important: You must use the above format with clear labels (**Project Name:**, \
             **Project Period:**, **User Role:**, **Project Highlights:**), and use - symbol for bullet points."
        ));
    }

    (system, user)
}

pub fn cover_letter_prompts(input: &CoverLetterInput, lang: Lang) -> (String, String) {
    let system = lang
        .pick(
            "You are a professional cover letter writing assistant. Please write a professional \
             and targeted cover letter based on the user's resume, job description, and special requirements.",
            "你是一个专业的求职信撰写助手。请根据用户提供的简历、职位描述和特殊要求，撰写一份专业、有针对性的求职信。",
        )
        .to_string();

    let mut user = lang
        .pick(
            "Please write a professional cover letter based on the following information:\n\n",
            "请根据以下信息撰写一份专业的求职信：\n\n",
        )
        .to_string();

    user.push_str(&format!(
        "{}\n{}\n\n",
        lang.pick("Resume Content:", "简历内容："),
        input.resume_content
    ));
    user.push_str(&format!(
        "{}\n{}\n\n",
        lang.pick("Job Description:", "职位描述："),
        input.job_description
    ));
    if let Some(reqs) = input.special_requirements.filter(|r| !r.trim().is_empty()) {
        user.push_str(&format!(
            "{}\n{}\n\n",
            lang.pick("Special Requirements:", "特殊要求："),
            reqs
        ));
    }

    user.push_str(lang.pick(
        "Please write a professional and targeted cover letter that highlights the match between \
         the resume and job description, and demonstrates understanding and interest in the target company.",
        "请撰写一份专业、有针对性的求职信，突出简历与职位描述的匹配点，并体现对目标公司的了解和兴趣。",
    ));

    (system, user)
}

pub fn modify_cover_letter_prompts(
    input: &ModifyCoverLetterInput,
    lang: Lang,
) -> (String, String) {
    let system = lang
        .pick(
            "You are a professional cover letter modification assistant. Please modify the existing \
             cover letter according to the user's modification requirements while maintaining \
             professionalism and relevance.",
            "你是一个专业的求职信修改助手。请根据用户提供的修改要求，对现有的求职信进行修改，保持专业性和针对性。",
        )
        .to_string();

    let mut user = lang
        .pick(
            "Please modify the cover letter based on the following information:\n\n",
            "请根据以下信息修改求职信：\n\n",
        )
        .to_string();

    user.push_str(&format!(
        "{}\n{}\n\n",
        lang.pick("Resume Content:", "简历内容："),
        input.resume_content
    ));
    user.push_str(&format!(
        "{}\n{}\n\n",
        lang.pick("Job Description:", "职位描述："),
        input.job_description
    ));
    user.push_str(&format!(
        "{}\n{}\n\n",
        lang.pick("Current Cover Letter:", "当前求职信："),
        input.current_cover_letter
    ));
    user.push_str(&format!(
        "{}\n{}\n\n",
        lang.pick("Modification Requirement:", "修改要求："),
        input.modification_requirement
    ));

    user.push_str(lang.pick(
        "Please modify the cover letter according to the modification requirements while \
         maintaining professionalism and relevance, ensuring the modified cover letter meets the requirements.",
        "请根据修改要求对求职信进行修改，保持专业性和针对性，确保修改后的求职信符合要求。",
    ));

    (system, user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polish_prompt_carries_the_bullet_count() {
        let (_, user) = polish_prompts(
            &PolishInput {
                description: "Built a compiler",
                target_job_description: None,
                bullet_points: 4,
                special_requirements: None,
            },
            Lang::En,
        );
        assert!(user.contains("use 4 bullet points"));
        assert!(user.contains("**Project Highlights:**"));
        assert!(!user.contains("Target Job Description"));
    }

    #[test]
    fn polish_prompt_includes_target_jd_when_present() {
        let (_, user) = polish_prompts(
            &PolishInput {
                description: "Built a compiler",
                target_job_description: Some("Rust engineer role"),
                bullet_points: 3,
                special_requirements: Some("formal tone"),
            },
            Lang::En,
        );
        assert!(user.contains("Rust engineer role"));
        assert!(user.contains("Special Requirements: formal tone"));
    }

    #[test]
    fn polish_prompt_localizes_to_chinese() {
        let (system, user) = polish_prompts(
            &PolishInput {
                description: "写了一个编译器",
                target_job_description: None,
                bullet_points: 3,
                special_requirements: None,
            },
            Lang::Zh,
        );
        assert!(system.contains("润色助手"));
        assert!(user.contains("**项目名称：**"));
    }

    #[test]
    fn cover_letter_prompt_embeds_resume_and_jd() {
        let (_, user) = cover_letter_prompts(
            &CoverLetterInput {
                job_description: "Backend engineer at Acme",
                resume_content: "Five years of Rust",
                special_requirements: None,
            },
            Lang::En,
        );
        assert!(user.contains("Backend engineer at Acme"));
        assert!(user.contains("Five years of Rust"));
    }

    #[test]
    fn modify_prompt_includes_current_letter_and_requirement() {
        let (_, user) = modify_cover_letter_prompts(
            &ModifyCoverLetterInput {
                job_description: "jd",
                resume_content: "resume",
                current_cover_letter: "Dear hiring manager",
                modification_requirement: "make it shorter",
            },
            Lang::En,
        );
        assert!(user.contains("Dear hiring manager"));
        assert!(user.contains("make it shorter"));
    }
}

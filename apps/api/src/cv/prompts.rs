//! Extraction prompt templates, one pair per module tag.
//!
//! Every user prompt documents the exact JSON shape expected back, and for
//! list-shaped modules the convention that logical entries separated by a
//! literal "---" line must become separate `items` entries.

use crate::cv::models::CvModule;
use crate::lang::Lang;

const SYSTEM_EN: &str = "You are a professional CV information extraction assistant. \
Please extract structured information from the user's text and return it strictly in JSON format.";
const SYSTEM_ZH: &str =
    "你是一个专业的简历信息提取助手。请从用户提供的文本中提取结构化信息，并严格按照JSON格式返回。";

const BASIC_INFO_SCHEMA: &str = r#"{
  "name": "string (required)",
  "phone": "string (required)",
  "email": "string (required)",
  "linkedin": "string (optional)",
  "github": "string (optional)"
}"#;

const EDUCATION_SCHEMA: &str = r#"{
  "items": [{
    "degree": "string (required)",
    "school": "string (required)",
    "major": "string (required)",
    "period": "string (required, format: YYYY-MM to YYYY-MM or Sep YYYY - Jul YYYY)",
    "location": "string (required)",
    "gpa": "string (optional, can be CGPA, GPA, or similar format like 3.83/4.00)",
    "honors": ["string (optional array, e.g., Dean's List, Scholarship)"],
    "relevantCoursework": ["string (optional array, list of course names)"],
    "status": "string (optional, e.g., anticipated, completed)"
  }]
}"#;

const WORKING_SCHEMA: &str = r#"{
  "items": [{
    "company": "string (required)",
    "position": "string (required)",
    "period": "string (required)",
    "location": "string (required)",
    "responsibilities": ["string (required, at least 1)"],
    "achievements": ["string (optional array)"]
  }]
}"#;

const PROJECT_SCHEMA: &str = r#"{
  "items": [{
    "name": "string (required)",
    "period": "string (required)",
    "role": "string (optional)",
    "description": ["string (required, at least 1)"],
    "technologies": ["string (optional array)"]
  }]
}"#;

const PUBLICATIONS_SCHEMA: &str = r#"{
  "items": [{
    "title": "string (required)",
    "authors": ["string (required array)"],
    "journal": "string (optional)",
    "year": "string (required)",
    "doi": "string (optional)",
    "status": "string (optional: published/submitted/in-preparation)"
  }]
}"#;

const LEADERSHIP_SCHEMA: &str = r#"{
  "items": [{
    "title": "string (required)",
    "organization": "string (required)",
    "period": "string (required)",
    "location": "string (optional)",
    "description": ["string (required, at least 1)"]
  }]
}"#;

const SKILLS_SCHEMA: &str = r#"{
  "languages": "string (required)",
  "skills": "string (required)",
  "interests": "string (required)"
}"#;

/// Builds the (system, user) prompt pair for one extraction call.
pub fn extraction_prompts(module: CvModule, raw_text: &str, lang: Lang) -> (String, String) {
    let system = lang.pick(SYSTEM_EN, SYSTEM_ZH).to_string();

    let mut user = match (module, lang.is_zh()) {
        (CvModule::BasicInfo, false) => format!(
            "Please extract basic information from the following text and return in JSON format:\n\n{raw_text}\n\n\
             Required fields: name (full name, may contain both English and Chinese), \
             phone (phone number, may contain spaces or separators — preserve the original format), \
             email (email address, extract completely). \
             Optional fields: linkedin (LinkedIn URL, with or without the www. prefix), \
             github (GitHub URL, with or without the https:// prefix).\n\n\
             Note:\n\
             1. The name may contain commas or parentheses; preserve it in full\n\
             2. The text may use \"|\" or other separators between pieces of information\n\
             3. Extract links in full, whether or not they carry a protocol prefix"
        ),
        (CvModule::BasicInfo, true) => format!(
            "请从以下文本中提取基本信息，返回JSON格式：\n\n{raw_text}\n\n\
             必需字段：name（姓名，可能包含中英文）、phone（电话号码，保留原始格式）、email（邮箱地址）。\
             可选字段：linkedin（LinkedIn链接）、github（GitHub链接）。\n\n\
             注意：\n\
             1. 姓名可能包含逗号、括号等，请完整保留\n\
             2. 文本可能使用\"|\"或其他分隔符分隔不同信息，请正确识别\n\
             3. 链接可能包含或不包含协议前缀，请提取完整链接"
        ),
        (CvModule::Education, false) => format!(
            "Please extract education background information from the following text and return in JSON format:\n\n{raw_text}\n\n\
             {}\n\n\
             Required fields: degree (e.g., Bachelor of Science), school, major (may contain multiple majors \
             connected with & or and), period (if it contains a status like [anticipated], extract that to the \
             status field), location. Optional fields: gpa (keep the original format like 3.83/4.00), honors, \
             relevantCoursework, status.\n\n\
             Note:\n\
             - The text may contain tab alignment; ignore formatting and extract content only\n\
             - Each entry must contain all required fields; do not return empty strings",
            multi_entry_rules_en("education")
        ),
        (CvModule::Education, true) => format!(
            "请从以下文本中提取教育背景信息，返回JSON格式：\n\n{raw_text}\n\n\
             {}\n\n\
             必需字段：degree（学位）、school（学校名称）、major（专业）、period（时间，如包含[anticipated]等状态请提取到status字段）、\
             location（地点）。可选字段：gpa（保留原始格式如3.83/4.00）、honors（荣誉奖项数组）、\
             relevantCoursework（相关课程数组）、status（状态）。\n\n\
             注意：文本可能包含制表符对齐，请忽略格式只提取内容；每条记录必须包含所有必需字段，不能为空字符串",
            multi_entry_rules_zh("教育经历")
        ),
        (CvModule::Working, false) => format!(
            "Please extract working experience information from the following text and return in JSON format:\n\n{raw_text}\n\n\
             {}\n\n\
             Required fields: company, position, period, location, responsibilities (array, at least 1). \
             Optional fields: achievements (array).\n\n\
             Note: each work experience must contain all required fields; do not return empty strings",
            multi_entry_rules_en("work experience")
        ),
        (CvModule::Working, true) => format!(
            "请从以下文本中提取工作经历信息，返回JSON格式：\n\n{raw_text}\n\n\
             {}\n\n\
             必需字段：company（公司）、position（职位）、period（时间）、location（地点）、responsibilities（职责数组，至少1条）。\
             可选字段：achievements（成就数组）。\n\n\
             注意：每个工作经历必须包含所有必需字段，不能为空字符串",
            multi_entry_rules_zh("工作经历")
        ),
        (CvModule::Project, false) => format!(
            "Please extract project experience information from the following text and return in JSON format:\n\n{raw_text}\n\n\
             {}\n\n\
             Required fields: name, period, description (array, at least 1). \
             Optional fields: role, technologies (array).\n\n\
             Note: each project must contain all required fields; do not return empty strings",
            multi_entry_rules_en("project experience")
        ),
        (CvModule::Project, true) => format!(
            "请从以下文本中提取项目经历信息，返回JSON格式：\n\n{raw_text}\n\n\
             {}\n\n\
             必需字段：name（项目名称）、period（时间）、description（描述数组，至少1条）。\
             可选字段：role（角色）、technologies（技术栈数组）。\n\n\
             注意：每个项目经历必须包含所有必需字段，不能为空字符串",
            multi_entry_rules_zh("项目经历")
        ),
        (CvModule::Publications, false) => format!(
            "Please extract paper publication information from the following text and return in JSON format:\n\n{raw_text}\n\n\
             {}\n\n\
             Required fields: title, authors (array), year. Optional fields: journal, doi, status.\n\n\
             Note: each publication must contain all required fields; do not return empty strings",
            multi_entry_rules_en("publication")
        ),
        (CvModule::Publications, true) => format!(
            "请从以下文本中提取论文发表信息，返回JSON格式：\n\n{raw_text}\n\n\
             {}\n\n\
             必需字段：title（论文标题）、authors（作者数组）、year（年份）。可选字段：journal（期刊/会议）、doi（DOI）、status（状态）。\n\n\
             注意：每篇论文必须包含所有必需字段，不能为空字符串",
            multi_entry_rules_zh("论文")
        ),
        (CvModule::Leadership, false) => format!(
            "Please extract leadership experience information from the following text and return in JSON format:\n\n{raw_text}\n\n\
             {}\n\n\
             Required fields: title, organization, period, description (array, at least 1). \
             Optional fields: location.\n\n\
             Note: each leadership experience must contain all required fields; do not return empty strings",
            multi_entry_rules_en("leadership experience")
        ),
        (CvModule::Leadership, true) => format!(
            "请从以下文本中提取领导经验信息，返回JSON格式：\n\n{raw_text}\n\n\
             {}\n\n\
             必需字段：title（职位/活动名称）、organization（组织）、period（时间）、description（描述数组，至少1条）。\
             可选字段：location（地点）。\n\n\
             注意：每个领导经验必须包含所有必需字段，不能为空字符串",
            multi_entry_rules_zh("领导经验")
        ),
        (CvModule::Skills, false) => format!(
            "Please extract skills information from the following text and return in JSON format:\n\n{raw_text}\n\n\
             Please refine the information into three aspects:\n\
             1. languages: refine all language-related information into a text description\n\
             2. skills: refine all skill-related information (programming languages, tools, frameworks, etc.) into a text description\n\
             3. interests: refine all interest-related information into a text description\n\n\
             Each field should be a complete text description; do not use bullet points or list format."
        ),
        (CvModule::Skills, true) => format!(
            "请从以下文本中提取技能信息，返回JSON格式：\n\n{raw_text}\n\n\
             请将信息提炼成三个方面：\n\
             1. languages（语言）：提炼所有语言相关的信息，整合成一段文字描述\n\
             2. skills（技能）：提炼所有技能相关的信息（如编程语言、工具、框架等），整合成一段文字描述\n\
             3. interests（兴趣）：提炼所有兴趣相关的信息，整合成一段文字描述\n\n\
             每个字段应该是一段完整的文字描述，不需要使用bullet points或列表格式。"
        ),
    };

    user.push_str(&format_instructions(module, lang));
    (system, user)
}

fn schema_for(module: CvModule) -> &'static str {
    match module {
        CvModule::BasicInfo => BASIC_INFO_SCHEMA,
        CvModule::Education => EDUCATION_SCHEMA,
        CvModule::Working => WORKING_SCHEMA,
        CvModule::Project => PROJECT_SCHEMA,
        CvModule::Publications => PUBLICATIONS_SCHEMA,
        CvModule::Leadership => LEADERSHIP_SCHEMA,
        CvModule::Skills => SKILLS_SCHEMA,
    }
}

fn multi_entry_rules_en(noun: &str) -> String {
    format!(
        "Important Notes:\n\
         1. If the text contains \"---\" separators, this indicates multiple independent {noun} entries. \
         Each section separated by \"---\" should be extracted as a separate object in the items array.\n\
         2. If the text does not contain \"---\" separators but contains multiple entries \
         (e.g., multiple lines, multiple paragraphs), they should also be extracted as multiple items.\n\
         3. If the text contains only one entry, the items array should contain one object."
    )
}

fn multi_entry_rules_zh(noun: &str) -> String {
    format!(
        "重要提示：\n\
         1. 如果文本中包含\"---\"分隔符，这表示多个独立的{noun}，每个\"---\"分隔的部分应该提取为items数组中的一个独立对象。\n\
         2. 如果文本中没有\"---\"分隔符，但包含多条信息（例如多行、多个段落），也应该提取为多个items。\n\
         3. 如果文本中只有一条信息，items数组应包含一个对象。"
    )
}

/// The trailing format-enforcement block differs between list-shaped and
/// flat modules: only list modules get the non-empty `items` instructions.
fn format_instructions(module: CvModule, lang: Lang) -> String {
    let schema = schema_for(module);
    if module.is_list() {
        if lang.is_zh() {
            format!(
                "\n\n请严格按照以下JSON格式返回，只返回JSON对象，不要添加任何markdown代码块标记、说明文字或其他内容：\n{schema}\n\n\
                 重要：\n\
                 1. 直接返回JSON对象，不要使用```json或```标记\n\
                 2. 必须包含items数组，且items数组不能为空\n\
                 3. 如果文本中有多条记录，items数组应包含所有记录\n\
                 4. 如果文本中只有一条记录，items数组也应包含这一条记录"
            )
        } else {
            format!(
                "\n\nPlease return strictly in the following JSON format, only the JSON object without any \
                 markdown code blocks, explanations, or other content:\n{schema}\n\n\
                 Important:\n\
                 1. Return the JSON object directly, do not use ```json or ``` markers\n\
                 2. Must include an items array, and the items array must not be empty\n\
                 3. If there are multiple records in the text, the items array should contain all records\n\
                 4. If there is only one record in the text, the items array should still contain that one record"
            )
        }
    } else if lang.is_zh() {
        format!(
            "\n\n请严格按照以下JSON格式返回，只返回JSON对象，不要添加任何markdown代码块标记、说明文字或其他内容：\n{schema}\n\n\
             重要：\n\
             1. 直接返回JSON对象，不要使用```json或```标记\n\
             2. 必须包含所有必需字段"
        )
    } else {
        format!(
            "\n\nPlease return strictly in the following JSON format, only the JSON object without any \
             markdown code blocks, explanations, or other content:\n{schema}\n\n\
             Important:\n\
             1. Return the JSON object directly, do not use ```json or ``` markers\n\
             2. Must include all required fields"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_modules_document_the_delimiter_convention() {
        for module in [
            CvModule::Education,
            CvModule::Working,
            CvModule::Project,
            CvModule::Publications,
            CvModule::Leadership,
        ] {
            let (_, user) = extraction_prompts(module, "some text", Lang::En);
            assert!(user.contains("---"), "{module:?} prompt misses delimiter");
            assert!(user.contains("items array must not be empty"));
        }
    }

    #[test]
    fn flat_modules_do_not_mention_items() {
        for module in [CvModule::BasicInfo, CvModule::Skills] {
            let (_, user) = extraction_prompts(module, "some text", Lang::En);
            assert!(!user.contains("items array"), "{module:?}");
        }
    }

    #[test]
    fn raw_text_is_embedded() {
        let (_, user) = extraction_prompts(CvModule::Education, "BSc at CUHK", Lang::En);
        assert!(user.contains("BSc at CUHK"));
    }

    #[test]
    fn chinese_prompts_selected_for_zh() {
        let (system, user) = extraction_prompts(CvModule::Working, "文本", Lang::Zh);
        assert!(system.contains("简历信息提取助手"));
        assert!(user.contains("工作经历"));
        assert!(user.contains("---"));
    }

    #[test]
    fn schema_names_the_expected_fields() {
        let (_, user) = extraction_prompts(CvModule::Publications, "t", Lang::En);
        for field in ["title", "authors", "journal", "year", "doi", "status"] {
            assert!(user.contains(field), "missing {field}");
        }
    }
}

use serde::Deserialize;
use ts_rs::TS;

// 总览主分类
//
// quiz/project 的划分来自标题与 exam_type 的启发式判断，见
// services::overview::categorize。
#[derive(Debug, Clone, Copy, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/overview.ts")]
pub enum MainCategory {
    Quiz,
    Project,
}

impl<'de> Deserialize<'de> for MainCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "quiz" => Ok(MainCategory::Quiz),
            "project" => Ok(MainCategory::Project),
            _ => Err(serde::de::Error::custom(format!(
                "无效的主分类: '{s}'. 支持的分类: quiz, project"
            ))),
        }
    }
}

/// 总览查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/overview.ts")]
pub struct OverviewQuery {
    // 教师批改视角：指定要查看的学生；学生视角忽略此参数
    pub student_id: Option<i64>,
    pub main_category: Option<MainCategory>,
}

//! 用户设置
//!
//! 以 JSON 保存在用户配置目录下，命令行参数优先于设置文件。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chess_ai::{AiConfig, Difficulty};
use serde::{Deserialize, Serialize};

/// 用户设置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// AI 难度
    pub difficulty: Difficulty,
    /// 覆盖难度对应的搜索深度
    pub depth: Option<u8>,
}

impl Settings {
    /// 获取默认设置文件路径
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("chess-cli");
            path.push("settings.json");
            path
        })
    }

    /// 从指定文件读取设置
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取设置文件: {}", path.display()))?;
        let settings = serde_json::from_str(&content)
            .with_context(|| format!("设置文件格式无效: {}", path.display()))?;
        Ok(settings)
    }

    /// 加载设置
    ///
    /// 没有指定路径时使用默认路径；文件不存在或无法解析时使用默认设置。
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::settings_path() {
                Some(path) => path,
                None => {
                    tracing::warn!("无法获取配置目录，使用默认设置");
                    return Self::default();
                }
            },
        };

        if !path.exists() {
            tracing::info!("设置文件不存在，使用默认设置");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                tracing::info!("已加载设置: {:?}", path);
                settings
            }
            Err(e) => {
                tracing::warn!("{:#}，使用默认设置", e);
                Self::default()
            }
        }
    }

    /// 保存设置到指定文件
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("无法创建配置目录: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self).context("序列化设置失败")?;
        std::fs::write(path, content)
            .with_context(|| format!("写入设置文件失败: {}", path.display()))?;

        tracing::info!("设置已保存: {:?}", path);
        Ok(())
    }

    /// 转换为 AI 配置
    pub fn to_ai_config(&self) -> AiConfig {
        let config = AiConfig::from_difficulty(self.difficulty);
        match self.depth {
            Some(depth) => config.with_depth(depth),
            None => config,
        }
    }
}

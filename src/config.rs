use crate::math;
use crate::renderer::{BlendState, DepthState, Renderer, Scissor, Viewport};
use cgmath::{Matrix4 as Mat4, Rad, Vector3 as Vec3};
use serde::Deserialize;
use serde_json::from_reader;
use std::{error::Error, fs::File, path::Path};
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub fovy_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraConfig {
    /// projection · view，与调用方 model 矩阵左乘组合
    pub fn view_proj(&self, aspect: f32) -> Mat4<f32> {
        let proj = math::perspective(
            Rad(self.fovy_degrees.to_radians()),
            aspect,
            self.near,
            self.far,
        );
        let view = math::look_at(
            self.position.into(),
            self.target.into(),
            Vec3::new(0.0, 1.0, 0.0),
        );
        proj * view
    }
}

/// 逐 draw 管线状态的可反序列化形式
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub viewport: Option<[i32; 4]>,
    pub scissor: Option<[f32; 4]>,
    pub blend: bool,
    pub depth_read: bool,
    pub depth_write: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            viewport: None,
            scissor: None,
            blend: false,
            depth_read: true,
            depth_write: true,
        }
    }
}

impl PipelineConfig {
    pub fn apply(&self, renderer: &mut Renderer<'_>) {
        if let Some([x, y, w, h]) = self.viewport {
            renderer.set_viewport(Viewport { x, y, w, h });
        }
        if let Some([min_x, min_y, max_x, max_y]) = self.scissor {
            renderer.set_scissor(Scissor {
                min_x,
                min_y,
                max_x,
                max_y,
            });
        }
        renderer.set_blend_state(BlendState {
            enabled: self.blend,
        });
        renderer.set_depth_state(DepthState {
            read: self.depth_read,
            write: self.depth_write,
        });
    }
}

pub fn load(path: &Path) -> Result<SceneConfig, Box<dyn Error>> {
    let file = File::open(path)?;
    let config: SceneConfig = from_reader(file)?;
    debug!(path = %path.display(), "场景配置加载完成");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_scene_json() {
        let json = r#"{
            "camera": {
                "position": [0.0, 0.0, 5.0],
                "target": [0.0, 0.0, 0.0],
                "fovy_degrees": 45.0,
                "near": 1.0,
                "far": 5.0
            },
            "pipeline": { "blend": true, "scissor": [0.0, 0.0, 0.5, 0.5] }
        }"#;
        let config: SceneConfig = serde_json::from_str(json).unwrap();
        assert!(config.pipeline.blend);
        assert!(config.pipeline.depth_read);
        assert_eq!(config.pipeline.scissor, Some([0.0, 0.0, 0.5, 0.5]));

        // 组合顺序为 projection · view：世界原点落在视锥内的负 z 上
        let vp = config.camera.view_proj(1.0);
        let origin = vp * cgmath::Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!(origin.w > 0.0);
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn pipeline_section_is_optional() {
        let json = r#"{
            "camera": {
                "position": [0.0, 0.0, 5.0],
                "target": [0.0, 0.0, 0.0],
                "fovy_degrees": 45.0,
                "near": 1.0,
                "far": 5.0
            }
        }"#;
        let config: SceneConfig = serde_json::from_str(json).unwrap();
        assert!(!config.pipeline.blend);
        assert!(config.pipeline.viewport.is_none());
    }
}

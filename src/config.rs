//! Site configuration.
//!
//! One TOML document is the control center for all content, theme tokens and
//! motion settings. It is read once at startup and immutable afterwards;
//! easing preset names and hex color strings are resolved while loading so a
//! bad value fails the load instead of a frame callback.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{self, Deserializer};
use serde::Deserialize;
use thiserror::Error;

use crate::animation::Easing;
use crate::geometry::Color;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Color::from_hex_str(&hex)
            .ok_or_else(|| de::Error::custom(format_args!("invalid hex color {hex:?}")))
    }
}

impl<'de> Deserialize<'de> for Easing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Easing::from_name(&name)
            .ok_or_else(|| de::Error::custom(format_args!("unknown easing preset {name:?}")))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Brand {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub role: String,
    pub tagline: String,
    pub email: String,
    pub location: String,
    pub status: Availability,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Availability {
    pub available_for_work: bool,
    pub availability_text: String,
    pub timezone: String,
}

/// Color tokens, resolved from hex strings at load.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub background: Color,
    pub surface: Color,
    pub card: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub border: Color,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub client: String,
    pub category: String,
    pub description: String,
    pub thumbnail: String,
    /// Drives the hover distortion strength of the project card canvas.
    #[serde(default = "default_warp_intensity")]
    pub warp_intensity: f32,
    #[serde(default)]
    pub tags: Vec<String>,
    pub year: String,
    #[serde(default)]
    pub link: String,
}

fn default_warp_intensity() -> f32 {
    0.5
}

#[derive(Debug, Clone, Deserialize)]
pub struct Philosophy {
    pub id: String,
    pub title: String,
    pub description: String,
    pub color: Color,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub categories: Vec<SkillCategory>,
    pub tools: Vec<Tool>,
    pub stats: Vec<Stat>,
}

impl Default for Skills {
    fn default() -> Self {
        let category = |name: &str, tools: &[&str]| SkillCategory {
            name: name.into(),
            tools: tools.iter().map(|t| t.to_string()).collect(),
        };
        let tool = |name: &str, level: u8, hex: u32| Tool {
            name: name.into(),
            level,
            color: Color::from_hex(hex),
        };
        let stat = |label: &str, value: &str| Stat {
            label: label.into(),
            value: value.into(),
        };
        Self {
            categories: vec![
                category(
                    "Design",
                    &["Figma", "Sketch", "Adobe XD", "Photoshop", "Illustrator"],
                ),
                category(
                    "Prototyping",
                    &["Framer", "Principle", "ProtoPie", "After Effects"],
                ),
                category(
                    "Development",
                    &["React", "TypeScript", "Tailwind", "GSAP", "Three.js"],
                ),
                category("Research", &["User Testing", "Hotjar", "Maze", "FigJam"]),
            ],
            tools: vec![
                tool("Figma", 95, 0xF24E1E),
                tool("Framer", 90, 0x0055FF),
                tool("After Effects", 85, 0x9999FF),
                tool("Spline", 80, 0xFF6B6B),
                tool("React", 88, 0x61DAFB),
                tool("Three.js", 75, 0xFFFFFF),
            ],
            stats: vec![
                stat("Years Experience", "5+"),
                stat("Projects Delivered", "50+"),
                stat("Happy Clients", "30+"),
                stat("Design Awards", "8"),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tool {
    pub name: String,
    pub level: u8,
    pub color: Color,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Navigation {
    pub sections: Vec<Section>,
    pub socials: Vec<Social>,
}

impl Default for Navigation {
    fn default() -> Self {
        let section = |id: &str, label: &str| Section {
            id: id.into(),
            label: label.into(),
        };
        let social = |platform: &str, url: &str| Social {
            platform: platform.into(),
            url: url.into(),
        };
        Self {
            sections: vec![
                section("hero", "Home"),
                section("works", "Works"),
                section("philosophy", "Philosophy"),
                section("skills", "Skills"),
                section("contact", "Contact"),
            ],
            socials: vec![
                social("LinkedIn", "https://linkedin.com/in/mughaldev"),
                social("Dribbble", "https://dribbble.com/mughaldev"),
                social("GitHub", "https://github.com/mughaldev"),
                social("Twitter", "https://twitter.com/mughaldev"),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Social {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct CursorSettings {
    pub trail_length: usize,
    /// Smoothing factor of the primary follower point.
    pub elasticity: f32,
    /// Smoothing factor of each trail point toward its predecessor.
    pub trail_smoothing: f32,
    pub base_size: f32,
    pub hover_scale: f32,
    pub trail_color: Color,
    pub hover_color: Color,
}

impl Default for CursorSettings {
    fn default() -> Self {
        Self {
            trail_length: 12,
            elasticity: 0.15,
            trail_smoothing: 0.1,
            base_size: 8.0,
            hover_scale: 2.5,
            trail_color: Color::from_hex(0x00D4FF),
            hover_color: Color::from_hex(0xFF3366),
        }
    }
}

/// Named easing presets used throughout the section choreography.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EasingPresets {
    pub gold_standard: Easing,
    pub bounce: Easing,
    pub snap: Easing,
    pub smooth: Easing,
    pub dramatic: Easing,
}

impl Default for EasingPresets {
    fn default() -> Self {
        Self {
            gold_standard: Easing::ExpoOut,
            bounce: Easing::ElasticOut {
                amplitude: 1.0,
                period: 0.5,
            },
            snap: Easing::BackOut { overshoot: 1.7 },
            // "power2.inOut" and "power4.out" in preset-name terms.
            smooth: Easing::PowerInOut(3),
            dramatic: Easing::PowerOut(5),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Durations {
    pub fast: f32,
    pub normal: f32,
    pub slow: f32,
    pub dramatic: f32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            fast: 0.3,
            normal: 0.6,
            slow: 1.0,
            dramatic: 1.5,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Staggers {
    pub default: f32,
    pub fast: f32,
    pub slow: f32,
}

impl Default for Staggers {
    fn default() -> Self {
        Self {
            default: 0.08,
            fast: 0.05,
            slow: 0.12,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ScrollSettings {
    /// Scrub smoothing factor handed to scrubbed triggers.
    pub scrub: f32,
    pub anticipate_pin: f32,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            scrub: 0.5,
            anticipate_pin: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub easing: EasingPresets,
    pub duration: Durations,
    pub stagger: Staggers,
    pub scroll: ScrollSettings,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Mobile {
    pub breakpoint: f32,
    pub reduced_motion: bool,
}

impl Default for Mobile {
    fn default() -> Self {
        Self {
            breakpoint: 768.0,
            reduced_motion: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Features {
    pub show_loading_screen: bool,
    pub show_cursor: bool,
    /// Host-facing: whether the host renders the alpha-channel banner. The
    /// orchestration core animates nothing for it.
    pub show_alpha_banner: bool,
    pub enable_smooth_scroll: bool,
    /// Host-facing: whether the host renders its background particle field.
    pub enable_particles: bool,
    /// Gates the per-card hover tilt and warp uniforms.
    pub enable_warp_canvas: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            show_loading_screen: true,
            show_cursor: true,
            show_alpha_banner: true,
            enable_smooth_scroll: true,
            enable_particles: true,
            enable_warp_canvas: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub brand: Brand,
    pub theme: Theme,
    pub projects: Vec<Project>,
    pub philosophy: Vec<Philosophy>,
    pub skills: Skills,
    pub navigation: Navigation,
    pub cursor: CursorSettings,
    pub animation: AnimationSettings,
    pub mobile: Mobile,
    pub features: Features,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            brand: Brand::default(),
            theme: Theme::default(),
            projects: default_projects(),
            philosophy: default_philosophy(),
            skills: Skills::default(),
            navigation: Navigation::default(),
            cursor: CursorSettings::default(),
            animation: AnimationSettings::default(),
            mobile: Mobile::default(),
            features: Features::default(),
        }
    }
}

fn default_projects() -> Vec<Project> {
    let project = |id: &str,
                   title: &str,
                   client: &str,
                   category: &str,
                   description: &str,
                   thumbnail: &str,
                   warp_intensity: f32,
                   tags: &[&str],
                   year: &str| Project {
        id: id.into(),
        title: title.into(),
        client: client.into(),
        category: category.into(),
        description: description.into(),
        thumbnail: thumbnail.into(),
        warp_intensity,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        year: year.into(),
        link: "#".into(),
    };
    vec![
        project(
            "project-1",
            "Nexus Finance",
            "Nexus Technologies",
            "Fintech Dashboard",
            "A comprehensive financial analytics platform with real-time data \
             visualization and AI-powered insights.",
            "/images/project-nexus.jpg",
            0.8,
            &["UI Design", "Dashboard", "Fintech"],
            "2024",
        ),
        project(
            "project-2",
            "Aura Wellness",
            "Aura Health",
            "Health & Fitness App",
            "Holistic wellness application featuring meditation tracking, habit \
             formation, and personalized health insights.",
            "/images/project-aura.jpg",
            0.6,
            &["Mobile App", "UX Research", "Health"],
            "2024",
        ),
        project(
            "project-3",
            "Vertex Commerce",
            "Vertex Retail",
            "E-commerce Platform",
            "Next-generation shopping experience with AR product visualization \
             and seamless checkout flow.",
            "/images/project-vertex.jpg",
            0.9,
            &["E-commerce", "AR/VR", "Web App"],
            "2023",
        ),
        project(
            "project-4",
            "Pulse Social",
            "Pulse Media",
            "Social Platform",
            "Community-driven content platform with advanced moderation and \
             engagement analytics.",
            "/images/project-pulse.jpg",
            0.7,
            &["Social", "Web App", "Analytics"],
            "2023",
        ),
    ]
}

fn default_philosophy() -> Vec<Philosophy> {
    let entry = |id: &str, title: &str, description: &str, hex: u32| Philosophy {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        color: Color::from_hex(hex),
    };
    vec![
        entry(
            "empathy",
            "Empathy First",
            "Every design decision starts with understanding the user's needs, \
             pain points, and aspirations.",
            0xFF3366,
        ),
        entry(
            "pixel",
            "Pixel Perfection",
            "Obsessive attention to detail ensures every element serves a \
             purpose and looks exquisite.",
            0x00D4FF,
        ),
        entry(
            "user-centric",
            "User-Centric Logic",
            "Interfaces that feel intuitive because they're built on solid \
             cognitive principles.",
            0xFFD700,
        ),
        entry(
            "motion",
            "Meaningful Motion",
            "Animations that guide, delight, and provide context, never \
             decoration for its own sake.",
            0x00FF88,
        ),
        entry(
            "accessibility",
            "Inclusive Design",
            "Creating experiences that work for everyone, regardless of \
             ability or device.",
            0xFF6B6B,
        ),
    ]
}

impl SiteConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(text)?;
        log::info!(
            "config: loaded {} projects, {} philosophy entries, {} nav sections",
            config.projects.len(),
            config.philosophy.len(),
            config.navigation.sections.len(),
        );
        Ok(config)
    }
}

impl Default for Brand {
    fn default() -> Self {
        Self {
            first_name: "Mughal".into(),
            last_name: "Dev".into(),
            full_name: "Mughal.Dev".into(),
            role: "UI/UX Designer".into(),
            tagline: "Crafting Digital Experiences".into(),
            email: "hello@mughal.dev".into(),
            location: "Global".into(),
            status: Availability::default(),
        }
    }
}

impl Default for Availability {
    fn default() -> Self {
        Self {
            available_for_work: true,
            availability_text: "Available for Work".into(),
            timezone: "UTC+5:30".into(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::from_hex(0x00D4FF),
            secondary: Color::from_hex(0xFF3366),
            accent: Color::from_hex(0xFFD700),
            background: Color::from_hex(0x0A0A0F),
            surface: Color::from_hex(0x12121A),
            card: Color::from_hex(0x1A1A24),
            text_primary: Color::from_hex(0xFFFFFF),
            text_secondary: Color::from_hex(0xA0A0B0),
            text_muted: Color::from_hex(0x6B6B7B),
            border: Color::from_hex(0x2A2A3A),
        }
    }
}

impl fmt::Display for SiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}), {} projects",
            self.brand.full_name,
            self.brand.role,
            self.projects.len()
        )
    }
}

pub mod layout;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Stable identity of a catalogue entry. Exhibit entities and the selection
/// state refer to projects by this id, never by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub u32);

/// One portfolio project. Immutable once the manifest is loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    /// Asset-relative image path, e.g. `images/aurora.png`.
    pub image: String,
    /// Ordered technology tags, rendered in this order by the overlay.
    pub technologies: Vec<String>,
    #[serde(default)]
    pub is_special: bool,
}

/// Portfolio owner shown in the header chrome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerProfile {
    pub name: String,
    pub title: String,
    pub portrait: String,
}

/// External profile link opened in a new browsing context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

/// Complete gallery manifest as a Bevy asset. Mirrors the JSON structure of
/// `assets/gallery.json` exactly and doubles as a resource once loaded.
#[derive(Asset, Debug, Clone, Serialize, Deserialize, TypePath, Resource)]
pub struct GalleryManifest {
    pub owner: OwnerProfile,
    pub social_links: Vec<SocialLink>,
    pub projects: Vec<Project>,
}

impl GalleryManifest {
    /// Look up a project by id.
    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// The featured project, if the catalogue designates one.
    pub fn special_project(&self) -> Option<&Project> {
        self.projects.iter().find(|p| p.is_special)
    }

    /// Every non-featured project, in catalogue order.
    pub fn ordinary_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| !p.is_special)
    }

    /// Enforce the at-most-one-special invariant. Keeps the first flagged
    /// project and demotes the rest, returning how many were demoted.
    pub fn normalise_special_flags(&mut self) -> usize {
        let mut seen = false;
        let mut demoted = 0;
        for project in &mut self.projects {
            if project.is_special {
                if seen {
                    project.is_special = false;
                    demoted += 1;
                } else {
                    seen = true;
                }
            }
        }
        demoted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "owner": { "name": "A", "title": "Designer", "portrait": "images/p.png" },
        "social_links": [ { "label": "Instagram", "url": "https://example.com" } ],
        "projects": [
            { "id": 1, "title": "One", "description": "d", "image": "images/1.png",
              "technologies": ["Figma", "React", "D3"], "is_special": true },
            { "id": 2, "title": "Two", "description": "d", "image": "images/2.png",
              "technologies": [] }
        ]
    }"#;

    #[test]
    fn manifest_parses_and_partitions() {
        let manifest: GalleryManifest = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(manifest.projects.len(), 2);
        assert_eq!(manifest.special_project().unwrap().id, ProjectId(1));
        let ordinary: Vec<_> = manifest.ordinary_projects().map(|p| p.id).collect();
        assert_eq!(ordinary, vec![ProjectId(2)]);
        // Missing flag defaults to false.
        assert!(!manifest.project(ProjectId(2)).unwrap().is_special);
    }

    #[test]
    fn tag_order_is_preserved() {
        let manifest: GalleryManifest = serde_json::from_str(SAMPLE).unwrap();
        let tags = &manifest.project(ProjectId(1)).unwrap().technologies;
        assert_eq!(tags, &["Figma", "React", "D3"]);
    }

    #[test]
    fn duplicate_special_flags_are_demoted() {
        let mut manifest: GalleryManifest = serde_json::from_str(SAMPLE).unwrap();
        manifest.projects[1].is_special = true;
        let demoted = manifest.normalise_special_flags();
        assert_eq!(demoted, 1);
        // First flagged project wins, deterministically.
        assert_eq!(manifest.special_project().unwrap().id, ProjectId(1));
        assert_eq!(manifest.ordinary_projects().count(), 1);
    }
}

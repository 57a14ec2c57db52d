use bevy::prelude::*;

use super::{GalleryManifest, ProjectId};
use crate::constants::{EXHIBIT_SPACING, SPECIAL_ROW_OFFSET_Z};

/// Where one exhibit sits in the gallery, before any interaction animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExhibitPlacement {
    pub project: ProjectId,
    pub position: Vec3,
    pub special: bool,
}

/// Map the catalogue to 3D placements. The special project (if any) sits
/// centred at a fixed offset in front of the row; the remaining projects are
/// spread symmetrically along X so the group is centred at the origin.
///
/// Deterministic in catalogue order and size, no randomness.
pub fn layout_exhibits(manifest: &GalleryManifest) -> Vec<ExhibitPlacement> {
    let mut placements = Vec::with_capacity(manifest.projects.len());

    if let Some(special) = manifest.special_project() {
        placements.push(ExhibitPlacement {
            project: special.id,
            position: Vec3::new(0.0, 0.0, SPECIAL_ROW_OFFSET_Z),
            special: true,
        });
    }

    let count = manifest.ordinary_projects().count();
    for (index, project) in manifest.ordinary_projects().enumerate() {
        let x = (index as f32 - (count as f32 - 1.0) / 2.0) * EXHIBIT_SPACING;
        placements.push(ExhibitPlacement {
            project: project.id,
            position: Vec3::new(x, 0.0, 0.0),
            special: false,
        });
    }

    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{OwnerProfile, Project};

    fn manifest(specials: &[bool]) -> GalleryManifest {
        GalleryManifest {
            owner: OwnerProfile {
                name: "A".into(),
                title: "Designer".into(),
                portrait: "images/p.png".into(),
            },
            social_links: vec![],
            projects: specials
                .iter()
                .enumerate()
                .map(|(i, &is_special)| Project {
                    id: ProjectId(i as u32 + 1),
                    title: format!("Project {}", i + 1),
                    description: String::new(),
                    image: String::new(),
                    technologies: vec![],
                    is_special,
                })
                .collect(),
        }
    }

    #[test]
    fn special_plus_three_matches_expected_row() {
        // Catalogue: id 1 special, ids 2..4 ordinary.
        let placements = layout_exhibits(&manifest(&[true, false, false, false]));
        assert_eq!(placements.len(), 4);

        let special = &placements[0];
        assert!(special.special);
        assert_eq!(special.project, ProjectId(1));
        assert_eq!(special.position, Vec3::new(0.0, 0.0, SPECIAL_ROW_OFFSET_Z));

        let xs: Vec<f32> = placements[1..].iter().map(|p| p.position.x).collect();
        assert_eq!(
            xs,
            vec![-EXHIBIT_SPACING, 0.0, EXHIBIT_SPACING],
            "three ordinary exhibits centre on the origin"
        );
        assert!(placements[1..].iter().all(|p| p.position.z == 0.0));
    }

    #[test]
    fn even_count_straddles_the_origin() {
        let placements = layout_exhibits(&manifest(&[false, false]));
        let xs: Vec<f32> = placements.iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![-EXHIBIT_SPACING / 2.0, EXHIBIT_SPACING / 2.0]);
    }

    #[test]
    fn layout_is_deterministic() {
        let m = manifest(&[true, false, false]);
        assert_eq!(layout_exhibits(&m), layout_exhibits(&m));
    }

    #[test]
    fn empty_and_special_only_catalogues() {
        assert!(layout_exhibits(&manifest(&[])).is_empty());

        let placements = layout_exhibits(&manifest(&[true]));
        assert_eq!(placements.len(), 1);
        assert!(placements[0].special);
    }

    #[test]
    fn no_special_keeps_everything_in_the_row_plane() {
        let placements = layout_exhibits(&manifest(&[false, false, false, false, false]));
        assert_eq!(placements.len(), 5);
        assert!(placements.iter().all(|p| !p.special && p.position.z == 0.0));
        // Symmetry: offsets mirror around zero.
        let xs: Vec<f32> = placements.iter().map(|p| p.position.x).collect();
        for (a, b) in xs.iter().zip(xs.iter().rev()) {
            assert!((a + b).abs() < f32::EPSILON);
        }
    }
}

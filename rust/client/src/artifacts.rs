// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Artifact selection: which run output feeds which viewer

use crate::types::Artifact;

/// Pick the 2D plan drawing from a run's artifact list.
///
/// Matches the `plan`/`plan_svg` kinds or the generator's `_plan.svg`
/// filename convention.
pub fn select_plan_artifact(artifacts: &[Artifact]) -> Option<&Artifact> {
    artifacts
        .iter()
        .find(|a| matches!(a.kind.as_str(), "plan" | "plan_svg") || a.file_name.ends_with("_plan.svg"))
}

/// Pick the 3D model for the volumetric viewer (`gltf` kind or a
/// `.glb`/`.gltf` file).
pub fn select_model_artifact(artifacts: &[Artifact]) -> Option<&Artifact> {
    artifacts.iter().find(|a| {
        a.kind == "gltf" || a.file_name.ends_with(".glb") || a.file_name.ends_with(".gltf")
    })
}

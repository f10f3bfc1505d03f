use wgpu::Device;

use crate::gfx::{
    camera::camera_utils::CameraManager,
    resources::material::{CYCLE_BLUE, CYCLE_RED, MARK_GREEN},
};

use super::object::{MeshData, Mesh, Object};

/// Phase of the periodic color cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CyclePhase {
    Red,
    Blue,
}

impl CyclePhase {
    pub fn color(self) -> [f32; 3] {
        match self {
            CyclePhase::Red => CYCLE_RED,
            CyclePhase::Blue => CYCLE_BLUE,
        }
    }

    fn flipped(self) -> Self {
        match self {
            CyclePhase::Red => CyclePhase::Blue,
            CyclePhase::Blue => CyclePhase::Red,
        }
    }
}

/// Main scene containing the objects, the camera, and the color-cycle state.
///
/// The first object added to the scene is the markable one: a right click
/// pins it green and exempts it from the color cycle.
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
    phase: CyclePhase,
    cycle_started: bool,
    marked: bool,
}

impl Scene {
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
            // The first tick flips to Red, so red is the first color shown.
            phase: CyclePhase::Blue,
            cycle_started: false,
            marked: false,
        }
    }

    /// Updates the scene (camera matrices, etc.)
    pub fn update(&mut self) {
        self.camera_manager.camera.update_view_proj();
    }

    pub fn add_object(&mut self, object: Object) {
        self.objects.push(object);
    }

    /// Adds one object per mesh loaded from a single file.
    ///
    /// Empty buffer sets are dropped; the remaining ones are named after
    /// the file, with a counter suffix when a file contributes several
    /// meshes or clashes with an earlier file.
    pub fn add_imported(&mut self, name: &str, meshes: Vec<MeshData>) {
        for data in meshes {
            if data.is_empty() {
                log::warn!("'{}' contains a mesh object with no triangles", name);
                continue;
            }
            let unique = self.ensure_unique_name(name);
            self.add_object(Object::new(unique, Mesh::new(data)));
        }
    }

    /// Flips the cycle color and applies it to every unmarked object.
    pub fn advance_color_cycle(&mut self) {
        self.phase = self.phase.flipped();
        self.cycle_started = true;
        log::debug!("changing color material to {:?}", self.phase);

        let color = self.phase.color();
        for (index, object) in self.objects.iter_mut().enumerate() {
            if self.marked && index == 0 {
                continue;
            }
            object.material.set_override_color(color);
        }
    }

    /// Toggles the mark on the first object.
    ///
    /// Marking pins the object green; unmarking rejoins it to the color
    /// cycle (or restores its per-vertex colors if the cycle has not
    /// started yet).
    pub fn toggle_mark(&mut self) {
        let marked = !self.marked;
        let cycle_color = self.cycle_started.then(|| self.phase.color());

        let Some(first) = self.objects.first_mut() else {
            return;
        };
        self.marked = marked;

        if marked {
            first.material.set_override_color(MARK_GREEN);
        } else if let Some(color) = cycle_color {
            first.material.set_override_color(color);
        } else {
            first.material.clear_override();
        }
    }

    pub fn is_marked(&self) -> bool {
        self.marked
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// Uploads vertex buffers, transforms and materials for all objects.
    ///
    /// Must be called after the GPU context is available and before
    /// rendering.
    pub fn init_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        for object in self.objects.iter_mut() {
            object.init_gpu_resources(device);
            object.material.update_gpu_resources(device, queue);
        }
    }

    /// Syncs material changes (cycle ticks, mark toggles) to the GPU.
    pub fn sync_materials(&mut self, device: &Device, queue: &wgpu::Queue) {
        for object in &mut self.objects {
            object.material.update_gpu_resources(device, queue);
        }
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn triangle_count(&self) -> u32 {
        self.objects.iter().map(|obj| obj.mesh.triangle_count()).sum()
    }

    pub fn ensure_unique_name(&self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut test_name = desired_name.to_string();

        while self.objects.iter().any(|obj| obj.name == test_name) {
            counter += 1;
            test_name = format!("{} ({})", desired_name, counter);
        }

        test_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{camera_controller::CameraController, orbit_camera::OrbitCamera};
    use crate::gfx::resources::material::{CYCLE_BLUE, CYCLE_RED, MARK_GREEN};
    use cgmath::{Vector3, Zero};

    fn test_scene(object_count: usize) -> Scene {
        let camera = OrbitCamera::new(400.0, 0.4, 0.2, Vector3::zero(), 1.0);
        let controller = CameraController::new(0.005, 12.0);
        let mut scene = Scene::new(CameraManager::new(camera, controller));

        for i in 0..object_count {
            let data = MeshData::from_indexed(
                &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
                &[[0, 1, 2]],
                [0.5, 0.5, 0.5],
            );
            scene.add_object(Object::new(format!("object {}", i), Mesh::new(data)));
        }

        scene
    }

    #[test]
    fn first_tick_applies_red_then_alternates() {
        let mut scene = test_scene(2);
        assert_eq!(scene.objects[0].material.override_color(), None);

        scene.advance_color_cycle();
        assert_eq!(scene.phase(), CyclePhase::Red);
        for object in &scene.objects {
            assert_eq!(object.material.override_color(), Some(CYCLE_RED));
        }

        scene.advance_color_cycle();
        for object in &scene.objects {
            assert_eq!(object.material.override_color(), Some(CYCLE_BLUE));
        }
    }

    #[test]
    fn marked_object_is_exempt_from_cycle() {
        let mut scene = test_scene(3);
        scene.toggle_mark();
        assert!(scene.is_marked());
        assert_eq!(
            scene.objects[0].material.override_color(),
            Some(MARK_GREEN)
        );

        scene.advance_color_cycle();
        assert_eq!(
            scene.objects[0].material.override_color(),
            Some(MARK_GREEN)
        );
        assert_eq!(scene.objects[1].material.override_color(), Some(CYCLE_RED));
        assert_eq!(scene.objects[2].material.override_color(), Some(CYCLE_RED));
    }

    #[test]
    fn unmarking_rejoins_the_cycle() {
        let mut scene = test_scene(2);
        scene.advance_color_cycle();
        scene.toggle_mark();
        scene.advance_color_cycle();

        scene.toggle_mark();
        assert!(!scene.is_marked());
        // Rejoins at the color currently shown by the rest of the scene.
        assert_eq!(
            scene.objects[0].material.override_color(),
            scene.objects[1].material.override_color()
        );
    }

    #[test]
    fn unmarking_before_first_tick_restores_vertex_colors() {
        let mut scene = test_scene(1);
        scene.toggle_mark();
        scene.toggle_mark();
        assert_eq!(scene.objects[0].material.override_color(), None);
    }

    #[test]
    fn mark_on_empty_scene_is_a_no_op() {
        let mut scene = test_scene(0);
        scene.toggle_mark();
        assert!(!scene.is_marked());
    }

    #[test]
    fn imported_meshes_get_unique_names() {
        let mut scene = test_scene(0);
        let triangle = MeshData::from_indexed(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            &[[0, 1, 2]],
            [0.5, 0.5, 0.5],
        );
        scene.add_imported("gears", vec![triangle.clone(), triangle.clone()]);
        scene.add_imported("gears", vec![triangle, MeshData::default()]);

        let names: Vec<_> = scene.objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["gears", "gears (1)", "gears (2)"]);
    }
}

use super::*;
use crate::bounds::AABB;
use crate::camera::ClipSpace;
use crate::ecs::systems::{CameraRigSystem, PhysicsSyncSystem, RenderSystem};
use crate::ecs::{CameraRig, PhysicsBody, SystemStage};
use crate::physics::{BodyHandle, BodyState, PhysicsBackend};
use crate::render::{MaterialHandle, MeshHandle, MockBackend, SceneRenderer, ShaderFeatures, ShaderHandle, ShaderVariant};
use crate::scene::{Renderable, Transform};
use glam::{Mat4, Quat, Vec3};
use rustc_hash::FxHashMap;

const DT: f32 = 1.0 / 60.0;

/// Bodies moving at a constant velocity
struct DriftingBodies {
    velocity: Vec3,
    positions: FxHashMap<BodyHandle, Vec3>,
    steps: u32,
}

impl PhysicsBackend for DriftingBodies {
    fn step(&mut self, dt: f32) {
        for position in self.positions.values_mut() {
            *position += self.velocity * dt;
        }
        self.steps += 1;
    }

    fn body_state(&self, body: BodyHandle) -> Option<BodyState> {
        self.positions.get(&body).map(|p| BodyState {
            position: *p,
            rotation: Quat::IDENTITY,
            world_bounds: AABB::from_center_half_extents(*p, Vec3::ONE),
        })
    }
}

struct FailingSystem;

impl System for FailingSystem {
    fn name(&self) -> &'static str {
        "FailingSystem"
    }

    fn stage(&self) -> SystemStage {
        SystemStage::Simulation
    }

    fn update(&mut self, _ctx: &mut FrameContext<'_>) -> Result<()> {
        Err(Error::InvalidState("boom".to_string()))
    }
}

fn camera() -> Camera {
    let mut camera = Camera::perspective(std::f32::consts::FRAC_PI_3, 1.0, 0.1, 200.0, ClipSpace::OpenGl);
    camera.look_at(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
    camera
}

fn runtime() -> Runtime {
    Runtime::new(camera(), GraphicsSettings::default()).unwrap()
}

fn render_system() -> RenderSystem<MockBackend> {
    RenderSystem::new(SceneRenderer::new(camera(), GraphicsSettings::default()).unwrap(), MockBackend::new())
}

fn variant() -> ShaderVariant {
    ShaderVariant::new(ShaderHandle(1), ShaderFeatures::empty())
}

fn unit_box() -> AABB {
    AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0))
}

#[test]
fn test_rejects_invalid_settings() {
    let settings = GraphicsSettings { anisotropy: 99, ..Default::default() };
    assert!(Runtime::new(camera(), settings).is_err());
}

#[test]
fn test_tick_without_systems() {
    let mut rt = runtime();
    assert_eq!(rt.tick_with_delta(DT).unwrap(), None);
    assert_eq!(rt.timer().frame_count(), 1);
    assert!(rt.tick().unwrap().is_none());
}

#[test]
fn test_simulation_runs_before_render() {
    let mut rt = runtime();
    rt.add_system(render_system());
    rt.add_system(CameraRigSystem::new(DT).unwrap());
    assert_eq!(rt.system_names(), vec!["CameraRigSystem", "RenderSystem"]);
}

#[test]
fn test_render_system_reports_stats() {
    let mut rt = runtime();
    rt.scene_mut().add_renderable(Renderable::static_mesh(
        MeshHandle(1), MaterialHandle(1), variant(), unit_box(), Mat4::from_translation(Vec3::new(0.0, 0.0, -20.0)),
    ));
    rt.build_bvh();
    rt.add_system(render_system());

    let stats = rt.tick_with_delta(DT).unwrap().unwrap();
    assert_eq!(stats.visible, 1);
    assert_eq!(stats.batches, 1);

    let system = rt.system::<RenderSystem<MockBackend>>().unwrap();
    assert_eq!(system.backend().frame_count(), 1);
    assert_eq!(system.last_stats(), stats);
}

#[test]
fn test_camera_rig_drives_camera() {
    let mut rt = runtime();
    let rig = rt.world_mut().spawn();
    rt.world_mut()
        .insert(rig, CameraRig::new(Vec3::ZERO, Vec3::NEG_Z).with_velocity(Vec3::new(0.0, 0.0, -60.0)))
        .unwrap();
    rt.add_system(CameraRigSystem::new(DT).unwrap());

    // 10 steps with lerping off lands exactly on the last step
    let settings = GraphicsSettings { camera_lerping: false, ..Default::default() };
    rt.apply_settings(settings).unwrap();
    rt.tick_with_delta(10.5 * DT).unwrap();

    let z = rt.camera().position().z;
    assert!((z + 10.0).abs() < 1e-3, "camera z = {}", z);
    assert!(rt.camera().forward().dot(Vec3::NEG_Z) > 0.999);
}

#[test]
fn test_camera_rig_lerps_between_steps() {
    let mut rt = runtime();
    let rig = rt.world_mut().spawn();
    rt.world_mut()
        .insert(rig, CameraRig::new(Vec3::ZERO, Vec3::NEG_Z).with_velocity(Vec3::new(60.0, 0.0, 0.0)))
        .unwrap();
    rt.add_system(CameraRigSystem::new(DT).unwrap());

    rt.tick_with_delta(2.5 * DT).unwrap();
    // previous step at x=1, current at x=2, alpha 0.5
    let x = rt.camera().position().x;
    assert!((x - 1.5).abs() < 1e-2, "camera x = {}", x);
}

#[test]
fn test_physics_sync_updates_dynamic_renderable() {
    let mut rt = runtime();
    let body = BodyHandle(1);
    let start = Vec3::new(0.0, 0.0, -20.0);

    let key = rt.scene_mut().add_renderable(Renderable::dynamic(
        MeshHandle(1), body, MaterialHandle(1), variant(), unit_box(), Mat4::from_translation(start),
    ));
    let entity = rt.world_mut().spawn();
    rt.world_mut().insert(entity, RenderableRef(key)).unwrap();
    rt.world_mut()
        .insert(entity, PhysicsBody::new(body, Transform::from_translation(start), AABB::from_center_half_extents(start, Vec3::ONE)))
        .unwrap();

    let mut positions = FxHashMap::default();
    positions.insert(body, start);
    let physics = DriftingBodies { velocity: Vec3::new(6.0, 0.0, 0.0), positions, steps: 0 };
    rt.add_system(PhysicsSyncSystem::new(physics, DT).unwrap());

    rt.tick_with_delta(3.0 * DT + 0.001).unwrap();
    let system = rt.system::<PhysicsSyncSystem<DriftingBodies>>().unwrap();
    assert_eq!(system.physics().steps, 3);

    let renderable = rt.scene().renderable(key).unwrap();
    let x = renderable.world_position().x;
    // between step 2 (x=0.2) and step 3 (x=0.3)
    assert!(x > 0.19 && x < 0.31, "x = {}", x);
    // swept bounds cover both snapshots
    assert!(renderable.world_bounds().contains(&AABB::from_center_half_extents(Vec3::new(0.3, 0.0, -20.0), Vec3::ONE)));
    assert!(renderable.world_bounds().contains(&AABB::from_center_half_extents(Vec3::new(0.2, 0.0, -20.0), Vec3::ONE)));
}

#[test]
fn test_apply_settings_reaches_render_backend() {
    let mut rt = runtime();
    rt.add_system(render_system());

    let settings = GraphicsSettings { anisotropy: 16, ..Default::default() };
    let changes = rt.apply_settings(settings).unwrap();
    assert_eq!(changes, vec![SettingsChange::Anisotropy(16)]);
    assert_eq!(rt.settings().anisotropy, 16);

    let system = rt.system::<RenderSystem<MockBackend>>().unwrap();
    assert_eq!(system.backend().settings_changes, changes);
    assert_eq!(system.renderer().settings().anisotropy, 16);
}

#[test]
fn test_apply_invalid_settings_keeps_old() {
    let mut rt = runtime();
    let bad = GraphicsSettings { shadow_map_size: 3, ..Default::default() };
    assert!(matches!(rt.apply_settings(bad), Err(Error::InvalidConfig(_))));
    assert_eq!(rt.settings(), &GraphicsSettings::default());
}

#[test]
fn test_on_resize_forwards_to_systems() {
    let mut rt = runtime();
    rt.add_system(render_system());
    rt.on_resize(640, 480).unwrap();
    let system = rt.system::<RenderSystem<MockBackend>>().unwrap();
    assert_eq!(system.backend().resizes, vec![(640, 480)]);
    assert_eq!(rt.camera().viewport().width, 640);
}

#[test]
fn test_despawn_removes_renderable() {
    let mut rt = runtime();
    let key = rt.scene_mut().add_renderable(Renderable::static_mesh(
        MeshHandle(1), MaterialHandle(1), variant(), unit_box(), Mat4::IDENTITY,
    ));
    let entity = rt.world_mut().spawn();
    rt.world_mut().insert(entity, RenderableRef(key)).unwrap();

    rt.despawn(entity).unwrap();
    assert!(!rt.scene().contains(key));
    assert!(!rt.world().is_alive(entity));
    assert!(matches!(rt.despawn(entity), Err(Error::InvalidResource(_))));
}

#[test]
fn test_failing_system_stops_tick() {
    let mut rt = runtime();
    rt.add_system(FailingSystem);
    rt.add_system(render_system());

    assert!(matches!(rt.tick_with_delta(DT), Err(Error::InvalidState(_))));
    let system = rt.system::<RenderSystem<MockBackend>>().unwrap();
    assert_eq!(system.backend().frame_count(), 0);
}

#[test]
fn test_system_mut_access() {
    let mut rt = runtime();
    rt.add_system(render_system());
    rt.system_mut::<RenderSystem<MockBackend>>().unwrap().backend_mut().fail_submit_at = Some(0);
    assert!(rt.system::<CameraRigSystem>().is_none());
}

#[test]
fn test_render_system_follows_runtime_settings() {
    let settings = GraphicsSettings { detail_culling: false, anisotropy: 8, ..Default::default() };
    let mut rt = Runtime::new(camera(), settings.clone()).unwrap();
    // renderer built with the defaults: detail culling on
    rt.add_system(render_system());

    let speck = AABB::new(Vec3::splat(-0.001), Vec3::splat(0.001));
    rt.scene_mut().add_renderable(Renderable::static_mesh(
        MeshHandle(1), MaterialHandle(1), variant(), speck, Mat4::from_translation(Vec3::new(0.0, 0.0, -100.0)),
    ));
    rt.scene_mut().add_renderable(Renderable::static_mesh(
        MeshHandle(2), MaterialHandle(1), variant(), unit_box(), Mat4::from_translation(Vec3::new(0.0, 0.0, -100.0)),
    ));
    rt.build_bvh();

    let stats = rt.tick_with_delta(DT).unwrap().unwrap();
    assert_eq!(stats.detail_culled, 0);
    assert_eq!(stats.draw_items, 2);

    let system = rt.system::<RenderSystem<MockBackend>>().unwrap();
    assert_eq!(system.renderer().settings(), &settings);
    assert_eq!(
        system.backend().settings_changes,
        vec![SettingsChange::Anisotropy(8), SettingsChange::DetailCulling(false)]
    );

    // a second frame has nothing left to reconcile
    rt.tick_with_delta(DT).unwrap();
    let system = rt.system::<RenderSystem<MockBackend>>().unwrap();
    assert_eq!(system.backend().settings_changes.len(), 2);
}

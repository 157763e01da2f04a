use crate::collision::BodyHandle;
use crate::math::{Mat3, Quat, Transform, Vec3};

/// The type of rigid body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyType {
    /// Dynamic bodies are affected by forces and collisions
    #[default]
    Dynamic,
    /// Static bodies never move
    Static,
    /// Kinematic bodies are moved by the user and push dynamic bodies around
    Kinematic,
}

/// The pose and activity state the collision pipeline reads from a body.
///
/// Integration lives outside this crate; callers move bodies with
/// [`World::set_body_position`](crate::World::set_body_position) and friends.
#[derive(Debug, Clone)]
pub struct RigidBody {
    /// Body handle for identification
    pub handle: BodyHandle,
    pub body_type: BodyType,
    /// Position in world space
    pub position: Vec3,
    /// Rotation matrix from local to world space
    pub orientation: Mat3,
    /// Inactive (sleeping) bodies do not generate contacts
    pub is_active: bool,
    pub user_data: u64,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            handle: BodyHandle::INVALID,
            body_type: BodyType::Dynamic,
            position: Vec3::ZERO,
            orientation: Mat3::IDENTITY,
            is_active: true,
            user_data: 0,
        }
    }
}

impl RigidBody {
    /// Returns the transform of this body
    #[inline]
    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.orientation)
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.body_type == BodyType::Dynamic
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.body_type == BodyType::Static
    }

    /// True when contacts against this body should be suppressed
    #[inline]
    pub fn is_static_or_inactive(&self) -> bool {
        self.is_static() || !self.is_active
    }

    /// True for a dynamic body that is awake
    #[inline]
    pub fn is_dynamic_and_active(&self) -> bool {
        self.is_dynamic() && self.is_active
    }

    pub fn wake_up(&mut self) {
        self.is_active = true;
    }
}

/// Description for creating a rigid body
#[derive(Debug, Clone)]
pub struct RigidBodyDesc {
    pub body_type: BodyType,
    pub position: Vec3,
    pub orientation: Mat3,
    pub is_active: bool,
    pub user_data: u64,
}

impl Default for RigidBodyDesc {
    fn default() -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position: Vec3::ZERO,
            orientation: Mat3::IDENTITY,
            is_active: true,
            user_data: 0,
        }
    }
}

impl RigidBodyDesc {
    /// Creates a new dynamic body description
    pub fn dynamic() -> Self {
        Self::default()
    }

    /// Creates a new static body description
    pub fn fixed() -> Self {
        Self {
            body_type: BodyType::Static,
            ..Self::default()
        }
    }

    /// Creates a new kinematic body description
    pub fn kinematic() -> Self {
        Self {
            body_type: BodyType::Kinematic,
            ..Self::default()
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets the orientation from a unit quaternion
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.orientation = Mat3::from_quat(rotation);
        self
    }

    pub fn with_orientation(mut self, orientation: Mat3) -> Self {
        self.orientation = orientation;
        self
    }

    /// Creates the body asleep
    pub fn sleeping(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn with_user_data(mut self, user_data: u64) -> Self {
        self.user_data = user_data;
        self
    }

    pub(crate) fn build(self, handle: BodyHandle) -> RigidBody {
        RigidBody {
            handle,
            body_type: self.body_type,
            position: self.position,
            orientation: self.orientation,
            is_active: self.is_active,
            user_data: self.user_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn build(desc: RigidBodyDesc) -> RigidBody {
        desc.build(BodyHandle::new(0))
    }

    #[test]
    fn test_body_transform() {
        let body = build(
            RigidBodyDesc::dynamic()
                .with_position(Vec3::new(1.0, 2.0, 3.0))
                .with_rotation(Quat::from_rotation_y(FRAC_PI_2)),
        );

        assert_eq!(body.position, Vec3::new(1.0, 2.0, 3.0));
        assert!(body.transform().transform_vector(Vec3::X).abs_diff_eq(-Vec3::Z, 1e-6));
    }

    #[test]
    fn test_static_or_inactive() {
        assert!(build(RigidBodyDesc::fixed()).is_static_or_inactive());
        assert!(!build(RigidBodyDesc::dynamic()).is_static_or_inactive());
        assert!(!build(RigidBodyDesc::kinematic()).is_static_or_inactive());

        let mut body = build(RigidBodyDesc::dynamic().sleeping());
        assert!(body.is_static_or_inactive());
        assert!(!body.is_dynamic_and_active());

        body.wake_up();
        assert!(body.is_dynamic_and_active());
    }

    #[test]
    fn test_kinematic_is_never_dynamic() {
        let body = build(RigidBodyDesc::kinematic());
        assert!(body.is_active);
        assert!(!body.is_dynamic_and_active());
    }

    #[test]
    fn test_desc_build() {
        let body = RigidBodyDesc::kinematic()
            .with_position(Vec3::Y)
            .with_orientation(Mat3::from_rotation_x(0.5))
            .sleeping()
            .with_user_data(7)
            .build(BodyHandle::new(4));

        assert_eq!(body.handle, BodyHandle::new(4));
        assert_eq!(body.body_type, BodyType::Kinematic);
        assert_eq!(body.orientation, Mat3::from_rotation_x(0.5));
        assert!(!body.is_active);
        assert_eq!(body.user_data, 7);
    }
}

use zenoh::Session;
use edgefirst_schemas::std_msgs::Header;
use edgefirst_schemas::builtin_interfaces::Time;
use serde::{Deserialize, Serialize};
use frames::NamedFrame;
use kinematics::JointState as KinematicsJointState;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JointState {
    pub header: Header,
    pub name: Vec<String>,
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
    pub effort: Vec<f64>,
}

impl Default for JointState {
    fn default() -> Self {
        Self {
            header: Header {
                stamp: Time::new(0, 0),
                frame_id: String::new(),
            },
            name: Vec::new(),
            position: Vec::new(),
            velocity: Vec::new(),
            effort: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Transform {
    pub translation: Vector3,
    pub rotation: Quaternion,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TransformStamped {
    pub header: Header,
    pub child_frame_id: String,
    pub transform: Transform,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TFMessage {
    pub transforms: Vec<TransformStamped>,
}

/// One decoded joint sample: the actuator states plus the stamp and
/// frame prefix carried over from the incoming message header.
#[derive(Debug, Clone)]
pub struct JointSample {
    pub stamp: Time,
    pub frame_prefix: String,
    pub joints: Vec<KinematicsJointState>,
}

pub struct CommunicationLayer {
    session: Session,
    joint_state_key: String,
    tf_key: String,
}

impl CommunicationLayer {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = zenoh::config::Config::default();
        let session = zenoh::open(config).await.map_err(|e| e.to_string())?;

        Ok(Self {
            session,
            joint_state_key: "rt/robot/joint_states".to_string(),
            tf_key: "rt/tf".to_string(),
        })
    }

    pub async fn publish_transform(&self, frame: &NamedFrame, stamp: &Time, prefix: &str) -> Result<(), Box<dyn std::error::Error>> {
        let msg = TFMessage {
            transforms: vec![Self::to_transform_stamped(frame, stamp, prefix)],
        };
        // Prepend ROS 2 CDR encapsulation header (Little Endian: 0x00 0x01 0x00 0x00)
        let mut payload = vec![0x00, 0x01, 0x00, 0x00];
        let data = cdr::serialize::<_, _, cdr::CdrLe>(&msg, cdr::Infinite)?;
        payload.extend(data);
        self.session.put(&self.tf_key, payload).await.map_err(|e| e.to_string())?;
        Ok(())
    }

    pub async fn subscribe_joint_state<F>(&self, callback: F) -> Result<(), Box<dyn std::error::Error>>
    where F: Fn(JointSample) + Send + Sync + 'static
    {
        let subscriber = self.session.declare_subscriber(&self.joint_state_key).await.map_err(|e| e.to_string())?;

        tokio::spawn(async move {
            while let Ok(sample) = subscriber.recv_async().await {
                 let payload = sample.payload().to_bytes();
                 // Check and skip ROS 2 CDR encapsulation header (4 bytes)
                 if payload.len() > 4 {
                     // We assume Little Endian for simplicity
                     let mut deserializer = cdr::Deserializer::<_, _, cdr::LittleEndian>::new(&payload[4..], cdr::Infinite);
                     match serde::Deserialize::deserialize(&mut deserializer) {
                         Ok(msg) => {
                             let msg: JointState = msg;
                             callback(Self::convert_from_ros_joint_state(&msg));
                         }
                         Err(_) => eprintln!("Failed to deserialize JointState"),
                     }
                 } else {
                     eprintln!("Received payload too short for ROS 2 message");
                 }
            }
        });
        Ok(())
    }

    fn to_transform_stamped(frame: &NamedFrame, stamp: &Time, prefix: &str) -> TransformStamped {
        let translation = frame.transform.translation.vector;
        let rotation = frame.transform.rotation.into_inner().coords;

        TransformStamped {
            header: Header {
                stamp: Time::new(stamp.sec, stamp.nanosec),
                frame_id: format!("{prefix}{}", frame.parent),
            },
            child_frame_id: format!("{prefix}{}", frame.child),
            transform: Transform {
                translation: Vector3 {
                    x: translation.x,
                    y: translation.y,
                    z: translation.z,
                },
                rotation: Quaternion {
                    x: rotation.x,
                    y: rotation.y,
                    z: rotation.z,
                    w: rotation.w,
                },
            },
        }
    }

    fn convert_from_ros_joint_state(msg: &JointState) -> JointSample {
        let mut joints = Vec::new();
        let len = msg.position.len();
        for i in 0..len {
            joints.push(KinematicsJointState {
                angle: msg.position[i],
                velocity: if i < msg.velocity.len() { msg.velocity[i] } else { 0.0 },
                effort: if i < msg.effort.len() { msg.effort[i] } else { 0.0 },
            });
        }
        JointSample {
            stamp: Time::new(msg.header.stamp.sec, msg.header.stamp.nanosec),
            frame_prefix: msg.header.frame_id.clone(),
            joints,
        }
    }
}

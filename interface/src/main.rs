mod communication;

use communication::{CommunicationLayer, JointSample};
use frames::{FrameSetOptions, ReferenceAxes, frames_for_sample};
use kinematics::{ARM_COUNT, MechanicalConfig, QuadArmModel};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Initializing parallel robot state publisher...");

    let config = MechanicalConfig::default();
    let axes = ReferenceAxes::from_config(&config);
    let model = QuadArmModel::new(config);
    let options = FrameSetOptions::default();

    let comms = CommunicationLayer::new().await?;

    let (tx, mut rx) = mpsc::unbounded_channel::<JointSample>();
    comms
        .subscribe_joint_state(move |sample| {
            let _ = tx.send(sample);
        })
        .await?;

    while let Some(sample) = rx.recv().await {
        if sample.joints.len() < ARM_COUNT {
            log::warn!(
                "sample has {} joint positions, expected {ARM_COUNT}",
                sample.joints.len()
            );
            continue;
        }
        let actuators: [f64; ARM_COUNT] = std::array::from_fn(|i| sample.joints[i].angle);

        match frames_for_sample(&model, &actuators, &axes, &options) {
            Ok(Some(set)) => {
                for frame in set.iter() {
                    comms
                        .publish_transform(frame, &sample.stamp, &sample.frame_prefix)
                        .await?;
                }
            }
            // Solver failure: warning already logged, wait for the next sample.
            Ok(None) => {}
            Err(err) => {
                log::error!("frame construction failed: {err}");
                return Err(err.into());
            }
        }
    }

    Ok(())
}

//! Per-frame stepping and energy bookkeeping

use crate::prelude::*;

pub fn advance_simulation(mut simulation: ResMut<Simulation>, physics_time: Res<PhysicsTime>) {
    if physics_time.is_paused() {
        return;
    }

    for _ in 0..physics_time.steps_per_frame {
        simulation.step();
    }
}

pub fn restart_after_time_limit(
    mut simulation: ResMut<Simulation>,
    physics_time: Res<PhysicsTime>,
    mut energy_monitor: ResMut<EnergyMonitor>,
) {
    let Some(limit) = physics_time.restart_after else {
        return;
    };
    if simulation.sim_time() <= limit {
        return;
    }

    info!(
        "Simulated time {:.2} passed {:.2}, restarting",
        simulation.sim_time(),
        limit
    );
    simulation.reset();
    energy_monitor.restart(simulation.total_energy());
}

pub fn track_energy(simulation: Res<Simulation>, mut energy_monitor: ResMut<EnergyMonitor>) {
    if !simulation.is_changed() {
        return;
    }

    let energy = simulation.total_energy();
    energy_monitor.record(energy);

    if energy_monitor.take_report(simulation.step_count()) {
        info!(
            "t = {:.2}, energy = {:.6}, drift = {:.4}%",
            simulation.sim_time(),
            energy,
            energy_monitor.relative_drift(energy) * 100.0
        );
    }
}

pub fn enforce_frame_limit(mut frame_limit: ResMut<FrameLimit>, mut exit: EventWriter<AppExit>) {
    frame_limit.frames += 1;
    if frame_limit.frames >= frame_limit.max_frames {
        info!("Reached {} frames, exiting", frame_limit.frames);
        exit.write(AppExit::Success);
    }
}

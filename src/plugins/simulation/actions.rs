//! Action handlers for simulation commands

use crate::prelude::*;

pub fn handle_simulation_commands(
    mut commands_reader: EventReader<SimulationCommand>,
    mut simulation: ResMut<Simulation>,
    mut physics_time: ResMut<PhysicsTime>,
    mut energy_monitor: ResMut<EnergyMonitor>,
    mut exit: EventWriter<AppExit>,
) {
    for command in commands_reader.read() {
        match *command {
            SimulationCommand::Restart => {
                simulation.reset();
                energy_monitor.restart(simulation.total_energy());
                info!("Simulation restarted");
            }
            SimulationCommand::TogglePause => {
                if physics_time.is_paused() {
                    physics_time.unpause();
                    info!("Simulation resumed at t = {:.2}", simulation.sim_time());
                } else {
                    physics_time.pause();
                    info!("Simulation paused at t = {:.2}", simulation.sim_time());
                }
            }
            SimulationCommand::SetGravitationalConstant(g) => {
                simulation.set_gravitational_constant(g);
                // The potential term jumps with G, so drift is measured from here
                energy_monitor.rebaseline(simulation.total_energy());
                debug!("Gravitational constant set to {}", g);
            }
            SimulationCommand::SetTimeScale(time_scale) => {
                simulation.set_time_scale(time_scale);
                debug!("Time scale set to {}", simulation.time_scale());
            }
            SimulationCommand::Quit => {
                exit.write(AppExit::Success);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::math::BASE_TIME_STEP;
    use crate::plugins::simulation::SimulationPlugin;

    fn create_test_app() -> App {
        let mut config = SimulationConfig::default();
        config.run.energy_report_interval = 0;

        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(SimulationPlugin::from_config(config).unwrap());
        app
    }

    #[test]
    fn test_pause_toggle() {
        let mut app = create_test_app();
        app.update();
        assert!(!app.world().resource::<PhysicsTime>().is_paused());

        app.world_mut().send_event(SimulationCommand::TogglePause);
        app.update();
        assert!(app.world().resource::<PhysicsTime>().is_paused());
        let paused_steps = app.world().resource::<Simulation>().step_count();

        app.update();
        assert_eq!(
            app.world().resource::<Simulation>().step_count(),
            paused_steps
        );

        app.world_mut().send_event(SimulationCommand::TogglePause);
        app.update();
        assert!(!app.world().resource::<PhysicsTime>().is_paused());
        assert_eq!(
            app.world().resource::<Simulation>().step_count(),
            paused_steps + 1
        );
    }

    #[test]
    fn test_restart_restores_initial_conditions() {
        let mut app = create_test_app();
        let initial_positions = app.world().resource::<Simulation>().positions().to_vec();

        for _ in 0..10 {
            app.update();
        }

        // Restart is applied before the frame's step, so one step follows it
        app.world_mut().send_event(SimulationCommand::Restart);
        app.update();

        let simulation = app.world().resource::<Simulation>();
        assert_eq!(simulation.step_count(), 1);
        assert_eq!(simulation.history().oldest(), initial_positions.as_slice());
    }

    #[test]
    fn test_parameter_changes_apply_before_the_step() {
        let mut app = create_test_app();

        app.world_mut()
            .send_event(SimulationCommand::SetGravitationalConstant(1.5));
        app.world_mut().send_event(SimulationCommand::SetTimeScale(0.5));
        app.update();

        let simulation = app.world().resource::<Simulation>();
        assert_eq!(simulation.gravitational_constant(), 1.5);
        assert_eq!(simulation.time_scale(), 0.5);
        assert!((simulation.sim_time() - 0.5 * BASE_TIME_STEP).abs() < 1e-15);

        let monitor = app.world().resource::<EnergyMonitor>();
        assert!(monitor.max_relative_drift < 1e-3);
    }

    #[test]
    fn test_negative_time_scale_is_clamped() {
        let mut app = create_test_app();

        app.world_mut().send_event(SimulationCommand::SetTimeScale(-1.0));
        app.update();

        let simulation = app.world().resource::<Simulation>();
        assert_eq!(simulation.time_scale(), 0.0);
        assert_eq!(simulation.sim_time(), 0.0);
    }

    #[test]
    fn test_quit() {
        let mut app = create_test_app();

        app.world_mut().send_event(SimulationCommand::Quit);
        app.update();

        assert_eq!(app.should_exit(), Some(AppExit::Success));
    }
}

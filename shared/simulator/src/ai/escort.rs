use super::steering;
use crate::command::Command;
use crate::ship::ShipAccessor;
use nalgebra::vector;

/// Follow `parent`: chase it across systems, mirror its landing or jump
/// orders, and otherwise orbit it.
///
/// Mirrored land and jump requests are held back until the parent is already
/// landing or jumping, or has clearance to, so an escort never leaves ahead of
/// its leader.
pub fn move_escort(ship: &ShipAccessor, parent: &ShipAccessor, command: &mut Command) {
    let kinematics = ship.kinematics();

    if ship.system() != parent.system() {
        command.set_target_system(Some(parent.system()));
        let direction = ship
            .direction_to(parent.system())
            .unwrap_or_else(|| vector![0.0, 0.0]);
        command.apply(steering::prepare_for_hyperspace(&kinematics, direction));
        command.set_jump();
        return;
    }

    if parent.has_land_command() {
        if let Some((handle, planet)) = parent.target_planet() {
            command.set_target_planet(Some(handle));
            command.apply(steering::move_to_planet(
                &kinematics,
                planet.position,
                planet.radius,
            ));
            if parent.is_landing() || parent.can_land() {
                command.set_land();
            }
            return;
        }
    }

    if parent.has_jump_command() {
        if let Some(system) = parent.target_system() {
            command.set_target_system(Some(system));
            let direction = ship
                .direction_to(system)
                .unwrap_or_else(|| vector![0.0, 0.0]);
            command.apply(steering::prepare_for_hyperspace(&kinematics, direction));
            if parent.is_jumping() || parent.can_jump() {
                command.set_jump();
            }
            return;
        }
    }

    command.apply(steering::circle_around(&kinematics, parent.position()));
}

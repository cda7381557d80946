//! Stateless steering routines.
//!
//! Each routine reads a ship's kinematic state and returns the controls that
//! move it toward a goal. None of them touch a command directly; the caller
//! decides how to combine the result with the rest of the ship's orders.

use crate::angle::cross;
use crate::command::{Maneuver, Turn};
use crate::ship::{Kinematics, HYPERSPACE_SPEED};
use nalgebra::Vector2;

/// Ships loitering around or attacking a target stop thrusting inside this
/// distance.
pub const LOITER_DISTANCE: f64 = 200.0;
/// Stop correcting the approach once the stopping point is this close to the
/// planet.
pub const ARRIVAL_TOLERANCE: f64 = 20.0;
/// Minimum cosine between facing and the needed direction before thrusting
/// on approach.
pub const APPROACH_THRUST_CONE: f64 = 0.8;
/// Below this speed a ship inside a planet's radius is considered parked.
pub const PARKED_SPEED: f64 = 1.0;

/// Turn toward `direction`, or not at all if one tick of turning would carry
/// the nose past it.
pub fn turn_toward(ship: &Kinematics, direction: Vector2<f64>) -> Turn {
    if direction.x == 0.0 && direction.y == 0.0 {
        return Turn::Straight;
    }
    let counter_clockwise = cross(direction, ship.facing.unit()) < 0.0;
    let turn = Turn::toward(counter_clockwise);

    let next = ship.facing + ship.turn_rate * turn.value();
    let still_counter_clockwise = cross(direction, next.unit()) < 0.0;
    if counter_clockwise == still_counter_clockwise {
        turn
    } else {
        Turn::Straight
    }
}

/// Point the nose against the direction of travel.
pub fn turn_backward(ship: &Kinematics) -> Turn {
    turn_toward(ship, -ship.velocity)
}

/// Where the ship would come to rest if it turned around now and burned
/// until stopped.
pub fn stopping_point(ship: &Kinematics) -> Vector2<f64> {
    let speed = ship.velocity.norm();
    if speed == 0.0 {
        return ship.position;
    }
    let heading = ship.velocity / speed;
    let cos = (-heading.dot(&ship.facing.unit())).clamp(-1.0, 1.0);
    let degrees_to_turn = cos.acos().to_degrees();
    let mut distance = speed * degrees_to_turn / ship.turn_rate;
    // v + (v - a) + (v - 2a) + ... + 0 has v / a terms averaging v / 2.
    distance += 0.5 * speed * speed / ship.acceleration;
    ship.position + heading * distance
}

/// Approach `target` so the ship coasts to a stop on top of it.
pub fn move_to_planet(ship: &Kinematics, target: Vector2<f64>, radius: f64) -> Maneuver {
    let facing = ship.facing.unit();
    let distance = target - ship.position;
    let speed = ship.velocity.norm();

    if distance.norm() < radius && speed < PARKED_SPEED {
        return Maneuver::default();
    }

    if distance.dot(&ship.velocity) < 0.0 {
        // Heading away: turn around first.
        return Maneuver {
            turn: Turn::toward(cross(distance, facing) < 0.0),
            thrust: distance.dot(&facing) > 0.0,
            fire: false,
        };
    }

    let offset = target - stopping_point(ship);
    let turn = if offset.norm() > ARRIVAL_TOLERANCE {
        Turn::toward(cross(offset, facing) < 0.0)
    } else {
        Turn::Straight
    };
    let thrust = offset
        .try_normalize(0.0)
        .map(|unit| unit.dot(&facing) > APPROACH_THRUST_CONE)
        .unwrap_or(false);
    Maneuver {
        turn,
        thrust,
        fire: false,
    }
}

/// Come to a stop, then face along `jump_direction`.
pub fn prepare_for_hyperspace(ship: &Kinematics, jump_direction: Vector2<f64>) -> Maneuver {
    let speed = ship.velocity.norm();
    if speed > HYPERSPACE_SPEED {
        let heading = ship.velocity / speed;
        Maneuver {
            turn: turn_backward(ship),
            thrust: heading.dot(&ship.facing.unit()) < -0.5,
            fire: false,
        }
    } else {
        Maneuver::turn(turn_toward(ship, jump_direction))
    }
}

fn closing_thrust(ship: &Kinematics, direction: Vector2<f64>) -> bool {
    ship.facing.unit().dot(&direction) >= 0.0 && direction.norm() > LOITER_DISTANCE
}

/// Loiter around `target`.
pub fn circle_around(ship: &Kinematics, target: Vector2<f64>) -> Maneuver {
    let direction = target - ship.position;
    Maneuver {
        turn: turn_toward(ship, direction),
        thrust: closing_thrust(ship, direction),
        fire: false,
    }
}

/// Engage a target at `target`. `aim` is the firing solution, if any, and
/// `in_range` whether any weapon reaches the target.
pub fn attack(
    ship: &Kinematics,
    target: Vector2<f64>,
    aim: Option<Vector2<f64>>,
    in_range: bool,
) -> Maneuver {
    let direction = target - ship.position;
    let (turn, fire) = match aim {
        Some(aim) => (turn_toward(ship, aim), true),
        None => (turn_toward(ship, direction), in_range),
    };
    Maneuver {
        turn,
        thrust: closing_thrust(ship, direction),
        fire,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::angle::Angle;
    use approx::assert_abs_diff_eq;
    use nalgebra::vector;
    use test_log::test;

    fn ship(facing: f64, velocity: Vector2<f64>) -> Kinematics {
        Kinematics {
            position: vector![0.0, 0.0],
            velocity,
            facing: Angle::new(facing),
            turn_rate: 6.0,
            acceleration: 0.5,
        }
    }

    #[test]
    fn test_turn_toward_sides() {
        let s = ship(0.0, vector![0.0, 0.0]);
        assert_eq!(turn_toward(&s, vector![0.0, 1.0]), Turn::CounterClockwise);
        assert_eq!(turn_toward(&s, vector![0.0, -1.0]), Turn::Clockwise);
        assert_eq!(turn_toward(&s, vector![0.0, 0.0]), Turn::Straight);
    }

    #[test]
    fn test_turn_toward_within_one_step() {
        // 4 degrees off with a 6 degree turn rate: turning would overshoot.
        let s = ship(0.0, vector![0.0, 0.0]);
        let direction = Angle::new(4.0).unit();
        assert_eq!(turn_toward(&s, direction), Turn::Straight);
        let direction = Angle::new(-7.0).unit();
        assert_eq!(turn_toward(&s, direction), Turn::Clockwise);
    }

    #[test]
    fn test_turn_never_crosses_goal() {
        for facing in (-180..180).step_by(7) {
            for goal in (-180..180).step_by(11) {
                let s = ship(facing as f64, vector![0.0, 0.0]);
                let direction = Angle::new(goal as f64).unit();
                let turn = turn_toward(&s, direction);
                let before = cross(direction, s.facing.unit()) < 0.0;
                let after =
                    cross(direction, (s.facing + s.turn_rate * turn.value()).unit()) < 0.0;
                if turn != Turn::Straight {
                    assert_eq!(before, after, "facing {facing} goal {goal}");
                }
            }
        }
    }

    #[test]
    fn test_turn_backward() {
        let s = ship(90.0, vector![3.0, 0.0]);
        // Velocity along +x, facing +y: reversing means turning counter-clockwise.
        assert_eq!(turn_backward(&s), Turn::CounterClockwise);
        let s = ship(180.0, vector![3.0, 0.0]);
        assert_eq!(turn_backward(&s), Turn::Straight);
    }

    #[test]
    fn test_stopping_point_at_rest() {
        let mut s = ship(30.0, vector![0.0, 0.0]);
        s.position = vector![12.5, -3.0];
        assert_eq!(stopping_point(&s), s.position);
    }

    #[test]
    fn test_stopping_point() {
        // Already facing backward: only the braking distance remains.
        let s = ship(180.0, vector![2.0, 0.0]);
        assert_abs_diff_eq!(stopping_point(&s), vector![4.0, 0.0], epsilon = 1e-9);

        // Facing forward: a 180 degree turn at 6 deg/tick is 30 ticks of coasting.
        let s = ship(0.0, vector![2.0, 0.0]);
        assert_abs_diff_eq!(stopping_point(&s), vector![64.0, 0.0], epsilon = 1e-9);
    }

    #[test]
    fn test_move_to_planet_parked() {
        let s = ship(0.0, vector![0.5, 0.0]);
        let m = move_to_planet(&s, vector![10.0, 0.0], 50.0);
        assert_eq!(m, Maneuver::default());
    }

    #[test]
    fn test_move_to_planet_heading_away() {
        let s = ship(0.0, vector![-3.0, 0.0]);
        let m = move_to_planet(&s, vector![1000.0, 0.0], 50.0);
        assert!(m.thrust);
        let s = ship(180.0, vector![-3.0, 0.0]);
        let m = move_to_planet(&s, vector![1000.0, 0.0], 50.0);
        assert!(!m.thrust);
    }

    #[test]
    fn test_move_to_planet_brakes_before_overshoot() {
        // Stopping point is far past the planet, so the ship should turn around
        // rather than thrust toward it.
        let s = ship(0.0, vector![10.0, 0.0]);
        let m = move_to_planet(&s, vector![300.0, 0.0], 50.0);
        assert!(!m.thrust);
        assert_ne!(m.turn, Turn::Straight);

        // Far away and slow: thrust straight in.
        let s = ship(0.0, vector![1.0, 0.0]);
        let m = move_to_planet(&s, vector![5000.0, 0.0], 50.0);
        assert!(m.thrust);
    }

    #[test]
    fn test_prepare_for_hyperspace() {
        let s = ship(180.0, vector![2.0, 0.0]);
        let m = prepare_for_hyperspace(&s, vector![0.0, 1.0]);
        assert!(m.thrust);
        assert_eq!(m.turn, Turn::Straight);

        let s = ship(0.0, vector![2.0, 0.0]);
        assert!(!prepare_for_hyperspace(&s, vector![0.0, 1.0]).thrust);

        let s = ship(0.0, vector![0.05, 0.0]);
        let m = prepare_for_hyperspace(&s, vector![0.0, 1.0]);
        assert!(!m.thrust);
        assert_eq!(m.turn, Turn::CounterClockwise);
    }

    #[test]
    fn test_circle_around() {
        let s = ship(0.0, vector![0.0, 0.0]);
        assert!(circle_around(&s, vector![500.0, 0.0]).thrust);
        assert!(!circle_around(&s, vector![150.0, 0.0]).thrust);
        assert!(!circle_around(&s, vector![-500.0, 0.0]).thrust);
    }

    #[test]
    fn test_attack_fire_rules() {
        let s = ship(90.0, vector![0.0, 0.0]);
        let target = vector![400.0, 0.0];
        assert!(attack(&s, target, Some(vector![400.0, 10.0]), false).fire);
        assert!(!attack(&s, target, None, false).fire);
        assert!(attack(&s, target, None, true).fire);
    }
}

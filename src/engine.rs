use rand::Rng;
use tracing::{debug, info, trace};

use crate::config::SCORE_INCREMENT;
use crate::session::{random_food, GameOverCause, Phase, SessionState};

/// Advances a running session by one step.
///
/// The move is always applied before collisions are checked, so a finished
/// session still shows the fatal position. Finished sessions are returned
/// untouched.
pub fn tick<R: Rng + ?Sized>(mut state: SessionState, rng: &mut R) -> SessionState {
    if state.phase != Phase::Running {
        return state;
    }

    let new_head = state.snake.advance();

    let ate = new_head == state.food;
    if ate {
        state.score += SCORE_INCREMENT;
    } else {
        state.snake.retract_tail();
    }

    if ate {
        state.food = random_food(rng);
        debug!(score = state.score, length = state.snake.len(), food = %state.food, "food eaten");
    }

    let cause = if !new_head.in_bounds() {
        Some(GameOverCause::Wall)
    } else if state.snake.bites_itself() {
        Some(GameOverCause::SelfCollision)
    } else {
        None
    };

    if let Some(cause) = cause {
        state.phase = Phase::GameOver(cause);
        info!(%cause, head = %new_head, score = state.score, length = state.snake.len(), "game over");
    } else {
        trace!(head = %new_head, direction = %state.snake.direction(), "moved");
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::{Cell, Direction::*, Snake};
    use rand::{rngs::StdRng, SeedableRng};

    const FAR_FOOD: Cell = Cell::new(500, 400);

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5EED)
    }

    fn cells(state: &SessionState) -> Vec<Cell> {
        state.snake().cells().collect()
    }

    #[test]
    fn first_tick_from_a_fresh_session() {
        let snake = Snake::new(Cell::new(100, 50), 4, Right);
        let mut state = SessionState::from_parts(snake, FAR_FOOD, 0);
        state.request_direction(Right);

        let state = tick(state, &mut rng());
        assert_eq!(
            cells(&state),
            vec![Cell::new(110, 50), Cell::new(100, 50), Cell::new(90, 50), Cell::new(80, 50)]
        );
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.score(), 0);
        assert_eq!(state.food(), FAR_FOOD);
    }

    #[test]
    fn length_is_kept_when_not_eating() {
        let mut rng = rng();
        let mut state = SessionState::from_parts(Snake::new(Cell::new(300, 200), 6, Down), FAR_FOOD, 0);
        for _ in 0..10 {
            let before = state.snake().len();
            state = tick(state, &mut rng);
            assert_eq!(state.snake().len(), before);
        }
        assert_eq!(state.snake().head(), Cell::new(300, 300));
    }

    #[test]
    fn eating_grows_and_scores() {
        let state = SessionState::from_parts(Snake::new(Cell::new(100, 50), 4, Right), Cell::new(110, 50), 20);
        let state = tick(state, &mut rng());

        assert_eq!(state.snake().len(), 5);
        assert_eq!(state.score(), 30);
        assert_eq!(state.snake().head(), Cell::new(110, 50));
        assert_eq!(state.snake().cells().last(), Some(Cell::new(70, 50)));
        assert!(state.food().in_bounds());
        assert_eq!(state.phase(), Phase::Running);
    }

    #[test]
    fn turn_is_applied_on_tick() {
        let mut state = SessionState::from_parts(Snake::new(Cell::new(100, 50), 4, Right), FAR_FOOD, 0);
        state.request_direction(Up);
        let state = tick(state, &mut rng());
        assert_eq!(state.snake().head(), Cell::new(100, 40));
        assert_eq!(state.snake().direction(), Up);
    }

    #[test]
    fn right_wall_boundary() {
        let state = SessionState::from_parts(Snake::new(Cell::new(710, 200), 4, Right), FAR_FOOD, 0);
        let state = tick(state, &mut rng());
        assert_eq!(state.phase(), Phase::GameOver(GameOverCause::Wall));
        assert_eq!(state.snake().head(), Cell::new(720, 200));

        let state = SessionState::from_parts(Snake::new(Cell::new(700, 200), 4, Right), FAR_FOOD, 0);
        let state = tick(state, &mut rng());
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.snake().head(), Cell::new(710, 200));
    }

    #[test]
    fn other_walls() {
        for (head, direction) in [
            (Cell::new(200, 0), Up),
            (Cell::new(200, 470), Down),
            (Cell::new(0, 200), Left),
        ] {
            let state = SessionState::from_parts(Snake::new(head, 4, direction), FAR_FOOD, 0);
            let state = tick(state, &mut rng());
            assert_eq!(state.phase(), Phase::GameOver(GameOverCause::Wall), "{} {}", head, direction);
        }
    }

    // Head at (100,100) heading left, body curling down and back.
    fn hook() -> Snake {
        Snake::from_cells(
            [
                Cell::new(100, 100),
                Cell::new(110, 100),
                Cell::new(110, 110),
                Cell::new(100, 110),
                Cell::new(90, 110),
            ],
            Left,
        )
    }

    #[test]
    fn turning_into_the_body_ends_the_game() {
        let mut state = SessionState::from_parts(hook(), FAR_FOOD, 40);
        state.request_direction(Down);
        let state = tick(state, &mut rng());
        assert_eq!(state.phase(), Phase::GameOver(GameOverCause::SelfCollision));
        assert_eq!(state.snake().head(), Cell::new(100, 110));
        assert_eq!(state.score(), 40);
    }

    #[test]
    fn turning_away_from_the_body_is_fine() {
        let mut state = SessionState::from_parts(hook(), FAR_FOOD, 0);
        state.request_direction(Up);
        let state = tick(state, &mut rng());
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.snake().head(), Cell::new(100, 90));
    }

    #[test]
    fn following_the_tail_is_not_a_collision() {
        let square = Snake::from_cells(
            [Cell::new(100, 100), Cell::new(110, 100), Cell::new(110, 110), Cell::new(100, 110)],
            Left,
        );
        let mut state = SessionState::from_parts(square, FAR_FOOD, 0);
        state.request_direction(Down);
        let state = tick(state, &mut rng());
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.snake().len(), 4);
    }

    #[test]
    fn finished_session_does_not_move() {
        let state = SessionState::from_parts(Snake::new(Cell::new(710, 200), 4, Right), FAR_FOOD, 0);
        let over = tick(state, &mut rng());
        let again = tick(over.clone(), &mut rng());
        assert_eq!(again, over);
    }

    #[test]
    fn reversal_request_does_not_kill() {
        let mut state = SessionState::from_parts(Snake::new(Cell::new(100, 50), 4, Right), FAR_FOOD, 0);
        state.request_direction(Left);
        let state = tick(state, &mut rng());
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.snake().head(), Cell::new(110, 50));
    }
}

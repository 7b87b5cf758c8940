use snake::config::GridSize;
use snake::game::{EndReason, GameState, TickOutcome};
use snake::input::Direction;
use snake::snake::{Position, Snake};

#[test]
fn stepwise_food_collection_and_wall_collision() {
    let mut state = GameState::new_with_seed(GridSize::new(6), 0, 42);

    state.snake = Snake::new(Position { x: 2, y: 1 }, Direction::Right, 3);
    state.food = Position { x: 3, y: 1 };

    assert_eq!(
        state.tick(),
        TickOutcome::Ate {
            new_high_score: Some(1)
        }
    );
    assert_eq!(state.score, 1);
    assert_eq!(state.snake.len(), 4);
    assert_eq!(state.snake.head(), Position { x: 3, y: 1 });
    assert!(!state.snake.occupies(state.food));

    state.food = Position { x: 0, y: 5 };
    assert!(state.set_pending_direction(Direction::Up));
    assert_eq!(state.tick(), TickOutcome::Moved);
    assert_eq!(state.snake.head(), Position { x: 3, y: 0 });

    let TickOutcome::GameOver(summary) = state.tick() else {
        panic!("leaving the top edge should end the game");
    };
    assert_eq!(summary.reason, EndReason::WallCollision);
    assert_eq!(summary.score, 1);
    assert_eq!(summary.high_score, 1);
}

#[test]
fn same_seed_replays_same_food() {
    let foods = |seed| {
        let mut state = GameState::new_with_seed(GridSize::new(10), 0, seed);
        let mut seen = vec![state.food];
        for _ in 0..5 {
            // Teleport the head next to the food so every tick eats.
            let food = state.food;
            let head = Position {
                x: food.x - 1,
                y: food.y,
            };
            if head.x < 0 || state.snake.occupies(head) {
                break;
            }
            state.snake = Snake::new(head, Direction::Right, 1);
            state.tick();
            seen.push(state.food);
        }
        seen
    };

    assert_eq!(foods(99), foods(99));
}

#[test]
fn rejected_reversal_keeps_heading() {
    let mut state = GameState::new_with_seed(GridSize::new(15), 0, 5);
    state.food = Position { x: 0, y: 0 };

    for requested in [Direction::Left, Direction::Left, Direction::Left] {
        assert!(!state.set_pending_direction(requested));
    }
    state.tick();

    assert_eq!(state.direction(), Direction::Right);
    assert_eq!(state.snake.head(), Position { x: 8, y: 7 });
}

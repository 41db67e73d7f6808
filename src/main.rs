use log::info;
use rand::seq::IndexedRandom;
use search_graph::games::tictactoe::TicTacToe;
use search_graph::{ActionId, Reward, SearchGraph as Graph, State, StateId};

const DESCENTS: usize = 200;

/// Walk from the root to a terminal state, preferring actions nobody has tried yet
fn descend(graph: &mut Graph<TicTacToe>) -> Result<StateId, Box<dyn std::error::Error>> {
    let mut rng = rand::rng();
    let mut current = graph.root_id();
    loop {
        let untried = graph.untried_actions(current);
        let action = match untried.choose(&mut rng) {
            Some(a) => a.clone(),
            None => match graph[current].children().keys().cloned().collect::<Vec<_>>().choose(&mut rng) {
                Some(a) => a.clone(),
                None => return Ok(current),  // terminal
            },
        };
        let Some(action_id) = graph.child_action(current, &action) else {
            return Ok(current);
        };
        current = graph.sample_state(action_id, false)?;
    }
}

/// Push the terminal payoff back up along the taken path
fn record(graph: &mut Graph<TicTacToe>, leaf: StateId) {
    let payoff: Reward = graph[leaf].state().evaluate();
    let path: Vec<ActionId> = graph.path_from_root(leaf);
    for action in path {
        graph[action].n += 1;
        graph[action].q += payoff;
        let from = graph.acting_state(action);
        graph[from].n += 1;
        graph[from].q += payoff;
    }
    graph[leaf].n += 1;
    graph[leaf].q += payoff;
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut graph = Graph::new(TicTacToe::new());
    for _ in 0..DESCENTS {
        let leaf = descend(&mut graph)?;
        record(&mut graph, leaf);
    }
    info!("{:?}", graph.stats());
    print!("{}", graph.dump(2));

    let root = graph.root();
    for (action, id) in root.children().iter() {
        let a = &graph[id];
        if a.n > 0 {
            println!("{:?}: n={} mean={:.3}", action, a.n, a.q / a.n as Reward);
        }
    }
    println!("Untried from root: {:?}", graph.untried_actions(graph.root_id()));
    println!("Legal from root: {}", root.state().actions().len());
    Ok(())
}

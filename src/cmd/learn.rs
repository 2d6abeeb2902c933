// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::io::BufRead;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::collection::Collection;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::learn::session::Session;
use crate::scheduler::format_interval;
use crate::store::CardStore;
use crate::types::grade::Grade;

pub fn learn_deck(directory: Option<String>, deck: &str, seed: Option<u64>) -> Fallible<()> {
    let coll: Collection = Collection::new(directory)?;
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    log::debug!("Learning {deck} in {}.", coll.directory.display());
    let mut session = Session::new(deck, coll.db, SystemClock, rng, coll.config.session_cap);
    let mut input = stdin().lock();
    let mut output = stdout().lock();
    drill(&mut session, &mut input, &mut output)
}

/// Run a session in the terminal. Ends on `q` or end of input.
fn drill<S: CardStore, C: Clock>(
    session: &mut Session<S, C>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Fallible<()> {
    if let Err(rejection) = session.start()? {
        return fail(rejection.to_string());
    }
    'cards: while let Some(card) = session.current() {
        let term = card.term().to_string();
        let definition = card.definition().to_string();
        let queue = session.queue();
        writeln!(output)?;
        writeln!(output, "[{}/{}] {term}", queue.position() + 1, queue.total())?;
        writeln!(output, "[press enter to reveal, q to quit]")?;
        match read_line(input)? {
            Some(line) if line != "q" => {}
            _ => break,
        }

        if let Err(rejection) = session.reveal() {
            return fail(rejection.to_string());
        }
        writeln!(output, "{definition}")?;
        if let Some(preview) = session.preview() {
            let labels: Vec<String> = Grade::ALL
                .iter()
                .zip(preview)
                .map(|(grade, days)| format!("{} {}", grade.as_str(), format_interval(days)))
                .collect();
            writeln!(output, "({})", labels.join(" | "))?;
        }

        loop {
            writeln!(output, "Grade: (0 = Again, 1 = Hard, 2 = Good, 3 = Easy)")?;
            let Some(line) = read_line(input)? else {
                break 'cards;
            };
            if line == "q" {
                break 'cards;
            }
            let grade = match line
                .parse::<u8>()
                .map_err(ErrorReport::from)
                .and_then(Grade::try_from)
            {
                Ok(grade) => grade,
                Err(e) => {
                    writeln!(output, "{e}")?;
                    continue;
                }
            };
            if let Err(rejection) = session.grade(grade)? {
                return fail(rejection.to_string());
            }
            break;
        }
    }

    let summary = session.summary();
    log::debug!("Summary: {}", serde_json::to_string(&summary)?);
    let heading = if session.is_completed() {
        "Session completed"
    } else {
        "Session ended"
    };
    writeln!(output)?;
    writeln!(
        output,
        "{heading}: graded {} of {} cards (again {}, hard {}, good {}, easy {}).",
        summary.graded, summary.total, summary.again, summary.hard, summary.good, summary.easy
    )?;
    session.end();
    Ok(())
}

fn read_line(input: &mut impl BufRead) -> Fallible<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

use activity_board::app::print_roster;
use activity_board::error::Result;
use activity_board::model::ApiOutcome;
use activity_board::request::{NoWasmClient, ParticipantParams, RequestApi};

fn usage(program: &str) {
    println!("usage: {program} <base-url> list");
    println!("       {program} <base-url> signup <email> <activity>");
    println!("       {program} <base-url> remove <email> <activity>");
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        usage(&args[0]);
        return Ok(());
    }

    let client = NoWasmClient::with_base_url(&args[1])?;

    match args[2].as_str() {
        "list" => {
            let roster = client.fetch_activities().await?;
            print_roster(&roster);
        }
        "signup" if args.len() >= 5 => {
            let outcome = client
                .sign_up(ParticipantParams {
                    activity: &args[4],
                    email: &args[3],
                })
                .await?;
            match outcome {
                ApiOutcome::Accepted(message) => {
                    println!("{message}");
                    print_roster(&client.fetch_activities().await?);
                }
                ApiOutcome::Rejected(detail) => println!("sign-up rejected: {detail}"),
            }
        }
        "remove" if args.len() >= 5 => {
            let outcome = client
                .unregister(ParticipantParams {
                    activity: &args[4],
                    email: &args[3],
                })
                .await?;
            match outcome {
                ApiOutcome::Accepted(message) => println!("{message}"),
                ApiOutcome::Rejected(detail) => println!("unregister rejected: {detail}"),
            }
            // The board refreshes after a removal either way; mirror that.
            print_roster(&client.fetch_activities().await?);
        }
        _ => usage(&args[0]),
    }

    Ok(())
}

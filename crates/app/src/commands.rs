//! Command-line front end. Every subcommand drives one screen the way a UI
//! would: send intents, wait for them to settle, render state and effects.

use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use clap::{Parser, Subcommand};
use presentation::features::{
    auth::{
        CreateAccountEffect, CreateAccountIntent, LoginEffect, LoginIntent, ProfileEffect,
        ProfileIntent,
    },
    catches::{
        CatchDetailsEffect, CatchDetailsIntent, CatchGridEffect, CatchGridIntent, StatsEffect,
        StatsIntent, SubmitCatchEffect, SubmitCatchIntent,
    },
    skunks::{SubmitSkunkEffect, SubmitSkunkIntent},
};

use crate::{
    container::AppContainer,
    error::{AppError, Result},
    features::Features,
    navigation::{Navigates, Navigator},
    settings::Overrides,
};

#[derive(Debug, Parser)]
#[command(name = "hooked", about = "Log and browse fishing catches", disable_version_flag = true)]
pub struct Cli {
    #[command(flatten)]
    pub overrides: Overrides,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and keep the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "HOOKED_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in.
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "HOOKED_PASSWORD", hide_env_values = true)]
        password: String,
        /// Defaults to the password.
        #[arg(long)]
        confirm_password: Option<String>,
    },
    Logout,
    /// Show the signed-in user.
    Profile,
    /// List catches, falling back to the local cache when offline.
    Catches {
        /// Skip the cache fallback and rebuild the cache.
        #[arg(long)]
        refresh: bool,
    },
    /// Show one catch.
    Catch { id: String },
    /// Delete a catch.
    Delete { id: String },
    /// Submit a catch.
    Submit {
        /// JPEG to upload.
        #[arg(long)]
        photo: Option<PathBuf>,
        #[arg(long)]
        species: Option<String>,
        #[arg(long)]
        weight: Option<String>,
        #[arg(long)]
        length: Option<String>,
        #[arg(long, requires = "longitude", allow_negative_numbers = true)]
        latitude: Option<f64>,
        #[arg(long, requires = "latitude", allow_negative_numbers = true)]
        longitude: Option<f64>,
        /// Use the device location.
        #[arg(long, conflicts_with = "latitude")]
        here: bool,
    },
    /// Log a trip where nothing was caught.
    Skunk {
        /// RFC 3339 time of the trip; now when omitted.
        #[arg(long)]
        fished_at: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long, requires = "longitude", allow_negative_numbers = true)]
        latitude: Option<f64>,
        #[arg(long, requires = "latitude", allow_negative_numbers = true)]
        longitude: Option<f64>,
        /// Use the device location.
        #[arg(long, conflicts_with = "latitude")]
        here: bool,
    },
    /// Catch statistics.
    Stats,
    /// AI fishing insights based on your catches.
    Insights,
}

pub async fn run(container: &AppContainer, features: &Features, command: Command) -> Result<()> {
    let navigator = Navigator::new(features);
    let logged_in = container.is_logged_in().await;
    tracing::debug!(start = %navigator.start_route(logged_in), "session checked");

    match command {
        Command::Login { email, password } => login(container, &navigator, email, password).await,
        Command::Register {
            first_name,
            last_name,
            email,
            password,
            confirm_password,
        } => {
            let confirm_password = confirm_password.unwrap_or_else(|| password.clone());
            let mut screen = container.create_account();
            screen.send(CreateAccountIntent::UpdateFirstName(first_name));
            screen.send(CreateAccountIntent::UpdateLastName(last_name));
            screen.send(CreateAccountIntent::UpdateEmail(email));
            screen.send(CreateAccountIntent::UpdatePassword(password));
            screen.send(CreateAccountIntent::UpdateConfirmPassword(confirm_password));
            screen.settle().await;
            screen.send(CreateAccountIntent::CreateAccount);
            let effects = screen.settle().await;

            let state = screen.state();
            let field_errors = [
                state.first_name_error,
                state.last_name_error,
                state.email_error,
                state.password_error,
                state.confirm_password_error,
            ]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();
            if !field_errors.is_empty() {
                return Err(AppError::Screen(field_errors.join("; ")));
            }
            for effect in effects {
                match &effect {
                    CreateAccountEffect::ShowError(message) => {
                        return Err(AppError::Screen(message.clone()));
                    }
                    CreateAccountEffect::NavigateToHome => {
                        println!("Account created.");
                        next(&navigator, &effect);
                    }
                }
            }
            Ok(())
        }
        Command::Logout => {
            let mut screen = container.profile();
            // The profile load is not needed here; its outcome is ignored.
            screen.settle().await;
            screen.send(ProfileIntent::Logout);
            for effect in screen.settle().await {
                match &effect {
                    ProfileEffect::ShowError(message) => {
                        return Err(AppError::Screen(message.clone()));
                    }
                    ProfileEffect::NavigateToLogin => {
                        println!("Logged out.");
                        next(&navigator, &effect);
                    }
                }
            }
            Ok(())
        }
        Command::Profile => {
            let mut screen = container.profile();
            fail_on(screen.settle().await, |effect| match effect {
                ProfileEffect::ShowError(message) => Some(message),
                ProfileEffect::NavigateToLogin => None,
            })?;
            let state = screen.state();
            println!("[{}] {}", state.initials, state.username);
            println!("{}", state.email);
            Ok(())
        }
        Command::Catches { refresh } => {
            let mut screen = container.catch_grid();
            screen.send(if refresh {
                CatchGridIntent::Refresh
            } else {
                CatchGridIntent::LoadCatches
            });
            fail_on(screen.settle().await, grid_error)?;
            let catches = screen.state().catches;
            if catches.is_empty() {
                println!("No catches yet.");
            }
            for catch in catches {
                println!(
                    "{:<8} {:<20} {}",
                    catch.id,
                    catch.name,
                    catch.image_url.unwrap_or_default()
                );
            }
            Ok(())
        }
        Command::Catch { id } => {
            let mut screen = container.catch_details();
            screen.send(CatchDetailsIntent::LoadCatchDetails(id));
            fail_on(screen.settle().await, |effect| match effect {
                CatchDetailsEffect::OnError(message) => Some(message),
            })?;
            let state = screen.state();
            let Some(details) = &state.catch_details else {
                return Err(AppError::Screen("Catch details not found".to_string()));
            };
            println!("{} ({})", details.species, details.id);
            println!("Caught:   {} at {}", details.date_caught, details.location);
            if let Some(measurements) = state.measurements_text() {
                println!("Size:     {measurements}");
            }
            if let Some(notes) = &details.notes {
                println!("Notes:    {notes}");
            }
            if let Some(photo) = &details.photo_url {
                println!("Photo:    {photo}");
            }
            for (key, value) in &details.weather {
                println!("Weather:  {key} = {value}");
            }
            Ok(())
        }
        Command::Delete { id } => {
            let mut screen = container.catch_grid();
            screen.send(CatchGridIntent::ShowDeleteDialog(id.clone()));
            screen.settle().await;
            screen.send(CatchGridIntent::DeleteCatch(id));
            for effect in screen.settle().await {
                match effect {
                    CatchGridEffect::ShowSuccess(message) => println!("{message}"),
                    CatchGridEffect::ShowError(message) => return Err(AppError::Screen(message)),
                    CatchGridEffect::NavigateToCatchDetails(_) => {}
                }
            }
            Ok(())
        }
        Command::Submit {
            photo,
            species,
            weight,
            length,
            latitude,
            longitude,
            here,
        } => {
            let has_photo = photo.is_some();
            let mut screen = container.submit_catch(photo);
            if has_photo {
                screen.send(SubmitCatchIntent::PickPhoto);
            }
            if let Some(species) = species {
                screen.send(SubmitCatchIntent::UpdateSpecies(species));
            }
            if let Some(weight) = weight {
                screen.send(SubmitCatchIntent::UpdateWeight(weight));
            }
            if let Some(length) = length {
                screen.send(SubmitCatchIntent::UpdateLength(length));
            }
            if let (Some(latitude), Some(longitude)) = (latitude, longitude) {
                screen.send(SubmitCatchIntent::UpdateLocation {
                    latitude,
                    longitude,
                });
            }
            if here {
                screen.send(SubmitCatchIntent::GetCurrentLocation);
            }
            for effect in screen.settle().await {
                match effect {
                    SubmitCatchEffect::ShowError(message) => return Err(AppError::Screen(message)),
                    SubmitCatchEffect::RequestLocationPermission => {
                        eprintln!("Location access denied; set [location] in the config.");
                    }
                    SubmitCatchEffect::CatchSubmittedSuccessfully(_)
                    | SubmitCatchEffect::NavigateBack => {}
                }
            }
            tracing::debug!(
                mode = ?screen.view_model().feature().mode(),
                location = %screen.state().location_text(),
                "submitting catch"
            );

            screen.send(SubmitCatchIntent::SubmitCatch);
            for effect in screen.settle().await {
                match &effect {
                    SubmitCatchEffect::ShowError(message) => {
                        return Err(AppError::Screen(message.clone()));
                    }
                    SubmitCatchEffect::CatchSubmittedSuccessfully(id) => {
                        println!("Catch {id} submitted.");
                        next(&navigator, &effect);
                    }
                    SubmitCatchEffect::RequestLocationPermission
                    | SubmitCatchEffect::NavigateBack => {}
                }
            }
            Ok(())
        }
        Command::Skunk {
            fished_at,
            notes,
            latitude,
            longitude,
            here,
        } => {
            let mut screen = container.submit_skunk().await;
            let fished_at =
                fished_at.unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
            screen.send(SubmitSkunkIntent::UpdateFishedAt(fished_at));
            if let Some(notes) = notes {
                screen.send(SubmitSkunkIntent::UpdateNotes(notes));
            }
            if let (Some(latitude), Some(longitude)) = (latitude, longitude) {
                screen.send(SubmitSkunkIntent::UpdateLocationFromMap {
                    latitude,
                    longitude,
                });
            }
            if here {
                screen.send(SubmitSkunkIntent::GetCurrentLocation);
            }
            let asked = screen
                .settle()
                .await
                .contains(&SubmitSkunkEffect::RequestLocationPermission);
            if asked {
                screen.send(SubmitSkunkIntent::RequestLocationPermission);
                screen.settle().await;
                if screen.state().has_location_permission {
                    screen.send(SubmitSkunkIntent::GetCurrentLocation);
                    screen.settle().await;
                } else {
                    eprintln!("Location access denied; set [location] in the config.");
                }
            }
            if let Some(message) = screen.state().error_message {
                return Err(AppError::Screen(message));
            }

            screen.send(SubmitSkunkIntent::Submit);
            let effects = screen.settle().await;
            let state = screen.state();
            for effect in effects {
                match &effect {
                    SubmitSkunkEffect::SubmitSuccess => {
                        if state.has_location() {
                            println!("Skunk logged at {}.", state.location_name);
                        } else {
                            println!("Skunk logged.");
                        }
                        next(&navigator, &effect);
                    }
                    SubmitSkunkEffect::SubmitError(_) | SubmitSkunkEffect::RequestLocationPermission => {}
                }
            }
            match state.error_message {
                Some(message) => Err(AppError::Screen(message)),
                None => Ok(()),
            }
        }
        Command::Stats => {
            let mut screen = container.stats();
            fail_on(screen.settle().await, stats_error)?;
            let state = screen.state();
            println!("Total catches:    {}", state.total_catches);
            println!("Unique species:   {}", state.unique_species);
            println!("Unique locations: {}", state.unique_locations);
            println!("Average weight:   {}", state.average_weight);
            println!("Average length:   {}", state.average_length);
            if let Some(name) = &state.biggest_catch_name {
                let weight = state.biggest_catch_weight.as_deref().unwrap_or("?");
                println!("Biggest catch:    {name} ({weight})");
            }
            if let Some(recent) = &state.most_recent_catch {
                println!("Most recent:      {recent}");
            }
            for species in &state.species_data {
                println!(
                    "  {:<20} {:>4} {:>5.1}%",
                    species.name,
                    species.count,
                    species.percentage * 100.0
                );
            }
            Ok(())
        }
        Command::Insights => {
            let mut screen = container.stats();
            screen.settle().await;
            screen.send(StatsIntent::LoadInsights);
            fail_on(screen.settle().await, stats_error)?;
            match screen.state().ai_insights {
                Some(insights) => println!("{insights}"),
                None => println!("No insights yet."),
            }
            Ok(())
        }
    }
}

async fn login(
    container: &AppContainer,
    navigator: &Navigator<'_>,
    email: String,
    password: String,
) -> Result<()> {
    let mut screen = container.login();
    screen.send(LoginIntent::UpdateEmail(email));
    screen.send(LoginIntent::UpdatePassword(password));
    screen.settle().await;
    screen.send(LoginIntent::Login);
    let effects = screen.settle().await;

    let state = screen.state();
    if let Some(error) = state.email_error.or(state.password_error) {
        return Err(AppError::Screen(error));
    }
    for effect in effects {
        match &effect {
            LoginEffect::ShowError(message) => return Err(AppError::Screen(message.clone())),
            LoginEffect::NavigateToHome => {
                println!("Logged in.");
                next(navigator, &effect);
            }
        }
    }
    Ok(())
}

/// Fails with the first error an effect carries.
fn fail_on<E>(effects: Vec<E>, error: impl Fn(E) -> Option<String>) -> Result<()> {
    match effects.into_iter().find_map(error) {
        Some(message) => Err(AppError::Screen(message)),
        None => Ok(()),
    }
}

fn grid_error(effect: CatchGridEffect) -> Option<String> {
    match effect {
        CatchGridEffect::ShowError(message) => Some(message),
        CatchGridEffect::ShowSuccess(_) | CatchGridEffect::NavigateToCatchDetails(_) => None,
    }
}

fn stats_error(effect: StatsEffect) -> Option<String> {
    match effect {
        StatsEffect::ShowError(message) => Some(message),
        StatsEffect::NavigateBack => None,
    }
}

fn next(navigator: &Navigator<'_>, effect: &impl Navigates) {
    if let Some((route, feature)) = navigator.resolve(effect) {
        println!("Next screen: {route} ({} feature)", feature.id);
    }
}

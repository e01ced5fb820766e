// src/bin/dashboard.rs
//
// Terminal front-end over the registry API: table view, prestation stats,
// pie-chart slices rendered as bars, and the create/edit/delete flows.

use std::env;
use std::io::{self, BufRead, Write};
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use medreg_api::client::RegistryClient;
use medreg_api::dashboard::{Dashboard, DoctorForm, NoticeKind};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let base_url = env::var("REGISTRY_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".into());
    let mut dash = Dashboard::new(RegistryClient::new(base_url));
    dash.refresh().await;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        dash.prune_notices(Instant::now());
        render(&dash);
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("r") | Some("refresh"), _) => dash.refresh().await,
            (Some("a") | Some("add"), _) => {
                match read_form(&mut lines)? {
                    Some(form) => {
                        dash.form = form;
                        dash.submit_create().await;
                    }
                    None => println!("cancelled"),
                }
            }
            (Some("e") | Some("edit"), Some(id)) => match id.parse::<i64>() {
                Ok(id) => edit(&mut dash, id, &mut lines).await?,
                Err(_) => println!("usage: edit <numMed>"),
            },
            (Some("d") | Some("delete"), Some(id)) => match id.parse::<i64>() {
                Ok(id) => delete(&mut dash, id, &mut lines).await?,
                Err(_) => println!("usage: delete <numMed>"),
            },
            (Some("q") | Some("quit"), _) => break,
            (None, _) => {}
            _ => println!("commands: refresh | add | edit <numMed> | delete <numMed> | quit"),
        }
    }

    Ok(())
}

async fn edit(
    dash: &mut Dashboard,
    id: i64,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> anyhow::Result<()> {
    let Some(doctor) = dash.doctors.iter().find(|d| d.num_med == id).cloned() else {
        println!("no doctor with numMed {id}");
        return Ok(());
    };
    dash.open_edit(&doctor);
    println!(
        "editing MED-{id} (nom={}, nbJours={}, tauxJournalier={})",
        doctor.nom, doctor.nb_jours, doctor.taux_journalier
    );
    match read_form(lines)? {
        Some(form) => {
            if let Some((_, pending)) = dash.edit.as_mut() {
                *pending = form;
            }
            dash.submit_edit().await;
        }
        None => {
            dash.cancel_edit();
            println!("cancelled");
        }
    }
    Ok(())
}

async fn delete(
    dash: &mut Dashboard,
    id: i64,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> anyhow::Result<()> {
    dash.request_delete(id);
    let answer = prompt(lines, &format!("delete doctor MED-{id}? [y/N] "))?;
    if answer.trim().eq_ignore_ascii_case("y") {
        dash.confirm_delete().await;
    } else {
        dash.cancel_delete();
        println!("cancelled");
    }
    Ok(())
}

fn read_form(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> anyhow::Result<Option<DoctorForm>> {
    let nom = prompt(lines, "nom: ")?;
    if nom.trim().is_empty() {
        return Ok(None);
    }
    let Ok(nb_jours) = prompt(lines, "nbJours: ")?.trim().parse::<i32>() else {
        println!("nbJours must be a non-negative integer");
        return Ok(None);
    };
    let Ok(taux_journalier) = prompt(lines, "tauxJournalier: ")?.trim().parse::<f64>() else {
        println!("tauxJournalier must be a non-negative number");
        return Ok(None);
    };
    Ok(Some(DoctorForm {
        nom: nom.trim().to_string(),
        nb_jours,
        taux_journalier,
    }))
}

fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    label: &str,
) -> anyhow::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(line?),
        None => Ok(String::new()),
    }
}

fn render(dash: &Dashboard) {
    println!();
    println!(
        "  min {:>12.2}   moyenne {:>12.2}   max {:>12.2}   total {:>12.2} Ariary",
        dash.stats.min, dash.stats.moyenne, dash.stats.max, dash.stats.total
    );
    println!();
    println!(
        "  {:<10} {:<24} {:>8} {:>16} {:>14}",
        "numMed", "nom", "nbJours", "tauxJournalier", "prestation"
    );
    if dash.doctors.is_empty() {
        println!("  (no doctors)");
    }
    for doc in &dash.doctors {
        println!(
            "  MED-{:<6} {:<24} {:>8} {:>16.2} {:>14.2}",
            doc.num_med,
            doc.nom,
            doc.nb_jours,
            doc.taux_journalier,
            doc.prestation()
        );
    }
    println!();
    let slices = dash.chart_data();
    let scale: f64 = slices.iter().map(|s| s.value).fold(0.0, f64::max);
    for slice in slices {
        let width = if scale > 0.0 {
            ((slice.value / scale) * 40.0).round() as usize
        } else {
            0
        };
        println!("  {:<9} {:>12.2} {}", slice.name, slice.value, "#".repeat(width));
    }
    for notice in &dash.notices {
        match notice.kind {
            NoticeKind::Success => println!("  [ok] {}", notice.message),
            NoticeKind::Error => println!("  [error] {}", notice.message),
        }
    }
}

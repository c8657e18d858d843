use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use colored::Colorize;

use crate::config::{Backend, Config};
use crate::fs::data_dir::DataDir;
use crate::models::contact::Contact;
use crate::models::deal::{Deal, DealDraft, DealStage};
use crate::store::{FileContactStore, FileDealStore};

/// Create the data directory and seed it with a small sample pipeline.
///
/// # Arguments
/// * `force` - Overwrite existing record files
/// * `empty` - Create empty record files without sample data
pub fn execute(config: &Config, force: bool, empty: bool) -> Result<()> {
    if config.store.backend != Backend::File {
        bail!("init only applies to the file backend; the remote service manages its own records");
    }

    let data_dir = DataDir::new(&config.store.data_dir);
    data_dir.initialize(force)?;
    println!(
        "{} Initialized {}",
        "✓".green().bold(),
        data_dir.root().display().to_string().dimmed()
    );

    if empty {
        return Ok(());
    }

    let now = Utc::now();
    let contacts = sample_contacts(now);
    let deals = sample_deals(now);

    FileContactStore::in_data_dir(&data_dir)
        .replace_all(&contacts)
        .context("Failed to write sample contacts")?;
    FileDealStore::in_data_dir(&data_dir)
        .replace_all(&deals)
        .context("Failed to write sample deals")?;

    println!(
        "{} Seeded {} contacts and {} deals",
        "✓".green().bold(),
        contacts.len(),
        deals.len()
    );
    println!("\n  Run {} to view the pipeline", "dealboard board".cyan());
    Ok(())
}

pub fn sample_contacts(now: DateTime<Utc>) -> Vec<Contact> {
    let contact = |id: u64, name: &str, email: &str, company: &str| Contact {
        id,
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        company: company.to_string(),
        notes: None,
        created_at: Some(now),
    };
    vec![
        contact(1, "Sarah Johnson", "sarah.johnson@techcorp.com", "TechCorp Solutions"),
        contact(2, "Michael Chen", "m.chen@innovate.io", "Innovate Labs"),
        contact(3, "Emily Rodriguez", "emily@growthco.com", "GrowthCo"),
        contact(4, "David Kim", "dkim@enterprise.net", "Enterprise Systems"),
    ]
}

pub fn sample_deals(now: DateTime<Utc>) -> Vec<Deal> {
    let seeds = [
        ("Enterprise Software License", 45000.0, DealStage::Proposal, 60, 1, 30),
        ("Cloud Migration Project", 120000.0, DealStage::Negotiation, 80, 4, 14),
        ("Marketing Automation Setup", 8500.0, DealStage::New, 10, 3, 60),
        ("Data Analytics Platform", 32000.0, DealStage::Qualified, 30, 2, 45),
        ("Annual Support Renewal", 15000.0, DealStage::ClosedWon, 100, 1, -7),
        ("Security Audit", 22000.0, DealStage::ClosedLost, 0, 4, -21),
    ];

    seeds
        .into_iter()
        .enumerate()
        .map(|(i, (title, value, stage, probability, contact, days))| {
            let draft = DealDraft {
                stage,
                probability,
                contact_id: Some(contact),
                close_date: Some(now + Duration::days(days)),
                ..DealDraft::new(title, value)
            };
            Deal::from_draft(i as u64 + 1, draft, now)
        })
        .collect()
}

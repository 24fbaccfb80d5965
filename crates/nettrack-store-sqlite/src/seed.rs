//! Demo data for local development.
//!
//! Seeding is idempotent: rows carry fixed ids and are upserted, so running
//! it twice leaves the same four lists, four contacts and five memberships.

use chrono::Utc;
use nettrack_core::{UserId, list::ListColor};
use uuid::Uuid;

use crate::{
  Result, SqliteStore,
  encode::{encode_dt, encode_tags, encode_user, encode_uuid},
};

/// Row counts written by [`SqliteStore::seed_demo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
  pub lists:       usize,
  pub contacts:    usize,
  pub memberships: usize,
}

struct DemoList {
  id:          u128,
  name:        &'static str,
  description: &'static str,
  color:       ListColor,
  icon:        &'static str,
  favorite:    bool,
  tags:        &'static [&'static str],
}

struct DemoContact {
  id:        u128,
  first:     &'static str,
  last:      &'static str,
  company:   &'static str,
  title:     &'static str,
  email:     &'static str,
  phone:     Option<&'static str>,
  linkedin:  Option<&'static str>,
  notes:     &'static str,
  tags:      &'static [&'static str],
  strength:  i64,
}

const TECH_SUMMIT: u128 = 0x1111_1111_1111_1111_1111_1111_1111_1111;
const STARTUP_MEETUP: u128 = 0x2222_2222_2222_2222_2222_2222_2222_2222;
const SALES_CONFERENCE: u128 = 0x3333_3333_3333_3333_3333_3333_3333_3333;
const UNIVERSITY_ALUMNI: u128 = 0x4444_4444_4444_4444_4444_4444_4444_4444;

const SARAH: u128 = 0xc111_1111_1111_1111_1111_1111_1111_1111;
const MIKE: u128 = 0xc222_2222_2222_2222_2222_2222_2222_2222;
const EMILY: u128 = 0xc333_3333_3333_3333_3333_3333_3333_3333;
const DAVID: u128 = 0xc444_4444_4444_4444_4444_4444_4444_4444;

const LISTS: &[DemoList] = &[
  DemoList {
    id:          TECH_SUMMIT,
    name:        "Tech Summit 2024",
    description: "Contacts from the annual tech summit",
    color:       ListColor::Blue,
    icon:        "💻",
    favorite:    true,
    tags:        &["tech", "conference", "networking"],
  },
  DemoList {
    id:          STARTUP_MEETUP,
    name:        "Startup Meetup",
    description: "Local entrepreneur networking group",
    color:       ListColor::Green,
    icon:        "🚀",
    favorite:    true,
    tags:        &["startup", "local", "entrepreneurs"],
  },
  DemoList {
    id:          SALES_CONFERENCE,
    name:        "Sales Conference",
    description: "Annual sales and marketing conference",
    color:       ListColor::Purple,
    icon:        "📈",
    favorite:    false,
    tags:        &["sales", "marketing", "conference"],
  },
  DemoList {
    id:          UNIVERSITY_ALUMNI,
    name:        "University Alumni",
    description: "Fellow graduates from university",
    color:       ListColor::Orange,
    icon:        "🎓",
    favorite:    true,
    tags:        &["alumni", "university", "education"],
  },
];

const CONTACTS: &[DemoContact] = &[
  DemoContact {
    id:       SARAH,
    first:    "Sarah",
    last:     "Johnson",
    company:  "TechCorp Inc",
    title:    "Senior Product Manager",
    email:    "sarah.johnson@techcorp.com",
    phone:    Some("+1 (555) 123-4567"),
    linkedin: Some("linkedin.com/in/sarahjohnson"),
    notes:    "Interested in AI/ML products. Follow up about potential collaboration.",
    tags:     &["AI", "product", "collaboration"],
    strength: 4,
  },
  DemoContact {
    id:       MIKE,
    first:    "Mike",
    last:     "Chen",
    company:  "StartupXYZ",
    title:    "Co-founder & CTO",
    email:    "mike@startupxyz.com",
    phone:    None,
    linkedin: Some("linkedin.com/in/mikechen"),
    notes:    "Building B2B SaaS platform. Very knowledgeable about scaling tech teams.",
    tags:     &["founder", "B2B", "SaaS"],
    strength: 5,
  },
  DemoContact {
    id:       EMILY,
    first:    "Emily",
    last:     "Rodriguez",
    company:  "Design Studio",
    title:    "UX Designer",
    email:    "emily@designstudio.com",
    phone:    Some("+1 (555) 987-6543"),
    linkedin: None,
    notes:    "Specializes in mobile UX. Interested in healthcare design projects.",
    tags:     &["UX", "mobile", "healthcare"],
    strength: 3,
  },
  DemoContact {
    id:       DAVID,
    first:    "David",
    last:     "Wilson",
    company:  "Goldman Sachs",
    title:    "Investment Analyst",
    email:    "david.wilson@gs.com",
    phone:    Some("+1 (555) 456-7890"),
    linkedin: Some("linkedin.com/in/davidwilson"),
    notes:    "Focused on fintech investments. Great connection for funding opportunities.",
    tags:     &["finance", "investment", "fintech"],
    strength: 3,
  },
];

/// `(membership id, contact, list, position)`.
const MEMBERSHIPS: &[(u128, u128, u128, i64)] = &[
  (0xa000_0000_0000_4000_8000_0000_0000_0001, SARAH, TECH_SUMMIT, 0),
  (0xa000_0000_0000_4000_8000_0000_0000_0002, SARAH, SALES_CONFERENCE, 0),
  (0xa000_0000_0000_4000_8000_0000_0000_0003, MIKE, STARTUP_MEETUP, 0),
  (0xa000_0000_0000_4000_8000_0000_0000_0004, EMILY, TECH_SUMMIT, 1),
  (0xa000_0000_0000_4000_8000_0000_0000_0005, DAVID, UNIVERSITY_ALUMNI, 0),
];

fn tags_json(tags: &[&str]) -> Result<String> {
  let owned: Vec<String> = tags.iter().map(|t| (*t).to_owned()).collect();
  encode_tags(&owned)
}

impl SqliteStore {
  /// Upsert the demo lists, contacts and memberships for `owner`.
  pub async fn seed_demo(&self, owner: UserId) -> Result<SeedSummary> {
    let owner_str = encode_user(owner);
    let now_str = encode_dt(Utc::now());

    let lists = LISTS
      .iter()
      .zip(0_i64..)
      .map(|(l, pos)| {
        Ok((encode_uuid(Uuid::from_u128(l.id)), l, pos, tags_json(l.tags)?))
      })
      .collect::<Result<Vec<_>>>()?;

    let contacts = CONTACTS
      .iter()
      .map(|c| Ok((encode_uuid(Uuid::from_u128(c.id)), c, tags_json(c.tags)?)))
      .collect::<Result<Vec<_>>>()?;

    let summary = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        for (id, l, pos, tags) in &lists {
          tx.execute(
            "INSERT INTO contact_lists (
               id, user_id, name, description, color, icon,
               is_favorite, position, tags, created_at, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
             ON CONFLICT(id) DO UPDATE SET
               user_id = excluded.user_id, name = excluded.name,
               description = excluded.description, color = excluded.color,
               icon = excluded.icon, is_favorite = excluded.is_favorite,
               position = excluded.position, tags = excluded.tags,
               updated_at = excluded.updated_at",
            rusqlite::params![
              id, owner_str, l.name, l.description, l.color.to_string(), l.icon,
              l.favorite, pos, tags, now_str,
            ],
          )?;
        }

        for (id, c, tags) in &contacts {
          tx.execute(
            "INSERT INTO contacts (
               id, user_id, first_name, last_name, company, job_title,
               email, phone, linkedin_url, notes, tags,
               relationship_strength, created_at, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)
             ON CONFLICT(id) DO UPDATE SET
               user_id = excluded.user_id, first_name = excluded.first_name,
               last_name = excluded.last_name, company = excluded.company,
               job_title = excluded.job_title, email = excluded.email,
               phone = excluded.phone, linkedin_url = excluded.linkedin_url,
               notes = excluded.notes, tags = excluded.tags,
               relationship_strength = excluded.relationship_strength,
               updated_at = excluded.updated_at",
            rusqlite::params![
              id, owner_str, c.first, c.last, c.company, c.title, c.email,
              c.phone, c.linkedin, c.notes, tags, c.strength, now_str,
            ],
          )?;
        }

        for (id, contact, list, pos) in MEMBERSHIPS {
          tx.execute(
            "INSERT INTO contact_list_memberships (id, contact_id, list_id, position, added_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO NOTHING",
            rusqlite::params![
              encode_uuid(Uuid::from_u128(*id)),
              encode_uuid(Uuid::from_u128(*contact)),
              encode_uuid(Uuid::from_u128(*list)),
              pos,
              now_str,
            ],
          )?;
        }

        tx.commit()?;
        Ok(SeedSummary {
          lists:       lists.len(),
          contacts:    contacts.len(),
          memberships: MEMBERSHIPS.len(),
        })
      })
      .await?;

    tracing::info!(
      %owner,
      lists = summary.lists,
      contacts = summary.contacts,
      memberships = summary.memberships,
      "seeded demo data"
    );
    Ok(summary)
  }
}

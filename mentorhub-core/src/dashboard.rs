//! State behind the two dashboards: who is assigned to whom, and the mentee
//! side's searchable mentor directory. Held in memory for the session.

use tracing::debug;

/// Mentees a mentor takes on at most, as shown in the "Active Mentees" stat.
pub const MENTEE_CAPACITY: usize = 5;

pub trait Identified {
    fn id(&self) -> u64;
}

/// An ordered list of people, removable by id.
#[derive(Clone, Debug, PartialEq)]
pub struct Roster<T> {
    entries: Vec<T>,
}

impl<T: Identified> Roster<T> {
    #[must_use]
    pub const fn new(entries: Vec<T>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes the entry with `id`, returning it. Unknown ids change nothing.
    pub fn remove(&mut self, id: u64) -> Option<T> {
        let index = self.entries.iter().position(|entry| entry.id() == id)?;
        debug!("removing {id} from roster");
        Some(self.entries.remove(index))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignedMentee {
    pub id: u64,
    pub name: String,
    pub role: String,
    pub joined: String,
}

impl Identified for AssignedMentee {
    fn id(&self) -> u64 {
        self.id
    }
}

fn mentee(id: u64, name: &str, role: &str, joined: &str) -> AssignedMentee {
    AssignedMentee {
        id,
        name: name.to_owned(),
        role: role.to_owned(),
        joined: joined.to_owned(),
    }
}

pub struct MentorDashboard {
    pub mentees: Roster<AssignedMentee>,
}

impl MentorDashboard {
    /// Starts with the demo mentees.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            mentees: Roster::new(vec![
                mentee(1, "Sarah Johnson", "Product Manager", "2 weeks ago"),
                mentee(2, "Marcus Chen", "Software Engineer", "1 month ago"),
                mentee(3, "Alex Rodriguez", "Designer", "3 weeks ago"),
            ]),
        }
    }

    pub fn remove_mentee(&mut self, id: u64) -> Option<AssignedMentee> {
        self.mentees.remove(id)
    }

    /// `"3 / 5"`.
    #[must_use]
    pub fn active_mentees(&self) -> String {
        format!("{} / {MENTEE_CAPACITY}", self.mentees.len())
    }

    #[must_use]
    pub fn at_capacity(&self) -> bool {
        self.mentees.len() >= MENTEE_CAPACITY
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryMentor {
    pub id: u64,
    pub name: String,
    pub title: String,
    pub region: String,
    pub expertise: Vec<String>,
    pub years_experience: u8,
    pub assigned: bool,
}

impl Identified for DirectoryMentor {
    fn id(&self) -> u64 {
        self.id
    }
}

impl DirectoryMentor {
    /// Case-insensitive substring match on the name or any expertise tag.
    /// The empty query matches everyone.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self
                .expertise
                .iter()
                .any(|tag| tag.to_lowercase().contains(&query))
    }
}

/// Search results, split the way the mentee dashboard shows them.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DirectorySearch<'a> {
    pub assigned: Vec<&'a DirectoryMentor>,
    pub available: Vec<&'a DirectoryMentor>,
}

fn directory_mentor(
    id: u64,
    name: &str,
    title: &str,
    region: &str,
    expertise: &[&str],
    years_experience: u8,
    assigned: bool,
) -> DirectoryMentor {
    DirectoryMentor {
        id,
        name: name.to_owned(),
        title: title.to_owned(),
        region: region.to_owned(),
        expertise: expertise.iter().map(|&tag| tag.to_owned()).collect(),
        years_experience,
        assigned,
    }
}

pub struct MenteeDashboard {
    mentors: Vec<DirectoryMentor>,
}

impl MenteeDashboard {
    #[must_use]
    pub const fn new(mentors: Vec<DirectoryMentor>) -> Self {
        Self { mentors }
    }

    /// Starts with the demo directory.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(vec![
            directory_mentor(
                1,
                "Sarah Johnson",
                "Product Manager",
                "San Francisco",
                &["Product Strategy", "Data Analytics", "Team Leadership"],
                8,
                true,
            ),
            directory_mentor(
                2,
                "Michael Chen",
                "Engineering Lead",
                "New York",
                &["System Design", "Backend Development", "Mentoring"],
                10,
                false,
            ),
            directory_mentor(
                3,
                "Emma Davis",
                "Data Scientist",
                "Seattle",
                &["Machine Learning", "Data Analytics", "Python"],
                6,
                false,
            ),
        ])
    }

    #[must_use]
    pub fn mentors(&self) -> &[DirectoryMentor] {
        &self.mentors
    }

    #[must_use]
    pub fn search(&self, query: &str) -> DirectorySearch<'_> {
        let (assigned, available) = self
            .mentors
            .iter()
            .filter(|mentor| mentor.matches(query))
            .partition(|mentor| mentor.assigned);
        DirectorySearch {
            assigned,
            available,
        }
    }

    /// Ends a mentorship. The mentor stays in the directory as available.
    pub fn remove_mentor(&mut self, id: u64) -> bool {
        match self.mentors.iter_mut().find(|mentor| mentor.id == id) {
            Some(mentor) if mentor.assigned => {
                debug!("unassigned mentor {id}");
                mentor.assigned = false;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MenteeDashboard, MentorDashboard};

    #[test]
    fn removing_a_mentee_updates_the_stat() {
        let mut dashboard = MentorDashboard::seeded();
        assert_eq!(dashboard.active_mentees(), "3 / 5");
        assert!(!dashboard.at_capacity());

        let removed = dashboard.remove_mentee(2);
        assert_eq!(removed.map(|mentee| mentee.name), Some("Marcus Chen".to_owned()));
        assert_eq!(dashboard.active_mentees(), "2 / 5");
        assert_eq!(dashboard.remove_mentee(2), None);

        let names: Vec<&str> = dashboard
            .mentees
            .entries()
            .iter()
            .map(|mentee| mentee.name.as_str())
            .collect();
        assert_eq!(names, ["Sarah Johnson", "Alex Rodriguez"]);
    }

    fn ids(search: &[&super::DirectoryMentor]) -> Vec<u64> {
        search.iter().map(|mentor| mentor.id).collect()
    }

    #[test]
    fn search_matches_names_and_expertise() {
        let dashboard = MenteeDashboard::seeded();

        let everyone = dashboard.search("");
        assert_eq!(ids(&everyone.assigned), [1]);
        assert_eq!(ids(&everyone.available), [2, 3]);

        let analytics = dashboard.search("ANALYTICS");
        assert_eq!(ids(&analytics.assigned), [1]);
        assert_eq!(ids(&analytics.available), [3]);

        let chen = dashboard.search("chen");
        assert!(chen.assigned.is_empty());
        assert_eq!(ids(&chen.available), [2]);

        assert_eq!(dashboard.search("gardening"), super::DirectorySearch::default());
    }

    #[test]
    fn removed_mentor_becomes_available() {
        let mut dashboard = MenteeDashboard::seeded();
        assert!(dashboard.remove_mentor(1));
        assert!(!dashboard.remove_mentor(1));
        assert!(!dashboard.remove_mentor(42));

        let everyone = dashboard.search("");
        assert!(everyone.assigned.is_empty());
        assert_eq!(ids(&everyone.available), [1, 2, 3]);
    }
}

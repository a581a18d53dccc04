//! Seed data for the mock backend.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::models::{
    Availability, Bid, BidStatus, JobListing, JobStatus, Message, Milestone, MilestoneStatus,
    PortfolioItem, Project, Review, Skill, SkillLevel, TeamMember, Worker,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn skill(id: &str, name: &str, level: SkillLevel) -> Skill {
    Skill {
        id: id.to_string(),
        name: name.to_string(),
        level,
    }
}

pub fn jobs() -> Vec<JobListing> {
    vec![
        JobListing {
            id: "job-1".into(),
            title: "Kitchen extension framing".into(),
            description: "Timber framing for a 20m² single-storey rear extension.".into(),
            budget: 18_500.0,
            company: "Northline Builders".into(),
            location: "Leeds".into(),
            required_skills: vec![
                skill("skill-carpentry", "Carpentry", SkillLevel::Expert),
                skill("skill-framing", "Framing", SkillLevel::Intermediate),
            ],
            posted_date: date(2024, 3, 1),
            deadline: date(2024, 4, 15),
            status: JobStatus::Open,
        },
        JobListing {
            id: "job-2".into(),
            title: "Client portal for site updates".into(),
            description: "React dashboard showing daily progress photos and milestones.".into(),
            budget: 9_000.0,
            company: "Harbour Homes".into(),
            location: "Remote".into(),
            required_skills: vec![
                skill("skill-react", "React", SkillLevel::Expert),
                skill("skill-typescript", "TypeScript", SkillLevel::Intermediate),
            ],
            posted_date: date(2024, 3, 4),
            deadline: date(2024, 5, 1),
            status: JobStatus::Open,
        },
        JobListing {
            id: "job-3".into(),
            title: "Rewire two-bed terrace".into(),
            description: "Full rewire including consumer unit replacement and certification.".into(),
            budget: 6_200.0,
            company: "Brightwire Electrical".into(),
            location: "Manchester".into(),
            required_skills: vec![skill("skill-electrical", "Electrical", SkillLevel::Expert)],
            posted_date: date(2024, 2, 20),
            deadline: date(2024, 3, 30),
            status: JobStatus::InProgress,
        },
        JobListing {
            id: "job-4".into(),
            title: "Bathroom tiling".into(),
            description: "Floor-to-ceiling porcelain tiling for a family bathroom.".into(),
            budget: 2_400.0,
            company: "Stone & Slate Ltd".into(),
            location: "York".into(),
            required_skills: vec![skill("skill-tiling", "Tiling", SkillLevel::Intermediate)],
            posted_date: date(2024, 1, 10),
            deadline: date(2024, 2, 10),
            status: JobStatus::Closed,
        },
    ]
}

pub fn workers() -> Vec<Worker> {
    vec![
        Worker {
            id: "worker-1".into(),
            name: "Priya Patel".into(),
            title: "Frontend Developer".into(),
            avatar: "/avatars/priya.png".into(),
            hourly_rate: 65.0,
            rating: 4.9,
            review_count: 2,
            skills: vec![
                skill("skill-react", "React", SkillLevel::Expert),
                skill("skill-typescript", "TypeScript", SkillLevel::Expert),
            ],
            availability: Availability::Available,
            bio: "Builds dashboards and portals for construction firms.".into(),
            location: "Remote".into(),
            completed_projects: 31,
            reviews: vec![
                Review {
                    id: "review-1".into(),
                    rating: 5.0,
                    comment: "Delivered the client portal ahead of schedule.".into(),
                    author_name: "Harbour Homes".into(),
                    date: date(2024, 1, 22),
                },
                Review {
                    id: "review-2".into(),
                    rating: 4.8,
                    comment: "Clear communication throughout.".into(),
                    author_name: "Northline Builders".into(),
                    date: date(2023, 11, 3),
                },
            ],
        },
        Worker {
            id: "worker-2".into(),
            name: "Tom Haines".into(),
            title: "Master Carpenter".into(),
            avatar: "/avatars/tom.png".into(),
            hourly_rate: 42.0,
            rating: 4.7,
            review_count: 1,
            skills: vec![
                skill("skill-carpentry", "Carpentry", SkillLevel::Expert),
                skill("skill-framing", "Framing", SkillLevel::Expert),
            ],
            availability: Availability::Busy,
            bio: "Twenty years of timber frame and joinery work.".into(),
            location: "Leeds".into(),
            completed_projects: 118,
            reviews: vec![Review {
                id: "review-3".into(),
                rating: 4.7,
                comment: "Tidy site, precise work.".into(),
                author_name: "Stone & Slate Ltd".into(),
                date: date(2024, 2, 14),
            }],
        },
        Worker {
            id: "worker-3".into(),
            name: "Aisha Okafor".into(),
            title: "Smart-Home Installer".into(),
            avatar: "/avatars/aisha.png".into(),
            hourly_rate: 55.0,
            rating: 4.8,
            review_count: 0,
            skills: vec![
                skill("skill-electrical", "Electrical", SkillLevel::Expert),
                skill("skill-react-native", "React Native", SkillLevel::Intermediate),
            ],
            availability: Availability::Available,
            bio: "Electrician who also ships the companion apps for the systems she installs.".into(),
            location: "Manchester".into(),
            completed_projects: 47,
            reviews: vec![],
        },
        Worker {
            id: "worker-4".into(),
            name: "Dan Mercer".into(),
            title: "Tiler".into(),
            avatar: "/avatars/dan.png".into(),
            hourly_rate: 35.0,
            rating: 4.4,
            review_count: 0,
            skills: vec![skill("skill-tiling", "Tiling", SkillLevel::Expert)],
            availability: Availability::Unavailable,
            bio: "Bathrooms, kitchens and wet rooms.".into(),
            location: "York".into(),
            completed_projects: 64,
            reviews: vec![],
        },
    ]
}

pub fn bids() -> Vec<Bid> {
    vec![
        Bid {
            id: "bid-1".into(),
            job_id: "job-1".into(),
            worker_id: "worker-2".into(),
            worker_name: "Tom Haines".into(),
            worker_avatar: "/avatars/tom.png".into(),
            amount: 17_800.0,
            duration: "5 weeks".into(),
            proposal: "Can start on the 18th with a crew of three.".into(),
            created_at: at(2024, 3, 2, 9, 15),
            status: BidStatus::Pending,
        },
        Bid {
            id: "bid-2".into(),
            job_id: "job-1".into(),
            worker_id: "worker-4".into(),
            worker_name: "Dan Mercer".into(),
            worker_avatar: "/avatars/dan.png".into(),
            amount: 19_200.0,
            duration: "6 weeks".into(),
            proposal: "Subcontracting the framing, tiling the utility room myself.".into(),
            created_at: at(2024, 3, 3, 14, 40),
            status: BidStatus::Rejected,
        },
        Bid {
            id: "bid-3".into(),
            job_id: "job-2".into(),
            worker_id: "worker-1".into(),
            worker_name: "Priya Patel".into(),
            worker_avatar: "/avatars/priya.png".into(),
            amount: 8_500.0,
            duration: "4 weeks".into(),
            proposal: "Reusing my milestone timeline component.".into(),
            created_at: at(2024, 3, 5, 11, 0),
            status: BidStatus::Accepted,
        },
    ]
}

pub fn portfolios() -> HashMap<String, Vec<PortfolioItem>> {
    HashMap::from([
        (
            "worker-1".to_string(),
            vec![
                PortfolioItem {
                    id: "portfolio-1".into(),
                    title: "Site progress dashboard".into(),
                    description: "Live photo feed and milestone tracker for a housing developer.".into(),
                    image: "/portfolio/dashboard.png".into(),
                    model_url: None,
                    tags: vec!["react".into(), "dashboard".into()],
                    link: Some("https://example.com/dashboard".into()),
                },
                PortfolioItem {
                    id: "portfolio-2".into(),
                    title: "3D floor plan viewer".into(),
                    description: "Interactive model viewer for pre-sale apartments.".into(),
                    image: "/portfolio/floorplan.png".into(),
                    model_url: Some("/models/floorplan.glb".into()),
                    tags: vec!["three.js".into(), "react".into()],
                    link: None,
                },
            ],
        ),
        (
            "worker-2".to_string(),
            vec![PortfolioItem {
                id: "portfolio-3".into(),
                title: "Oak frame garden room".into(),
                description: "Green oak frame with pegged joints.".into(),
                image: "/portfolio/oak-frame.png".into(),
                model_url: None,
                tags: vec!["carpentry".into(), "oak".into()],
                link: None,
            }],
        ),
    ])
}

pub fn projects() -> Vec<Project> {
    vec![
        Project {
            id: "project-1".into(),
            name: "Riverside townhouse renovation".into(),
            description: "Structural renovation and extension of a Victorian townhouse.".into(),
            created_at: at(2024, 1, 8, 8, 0),
            updated_at: at(2024, 3, 6, 17, 30),
            team: Some(vec![
                TeamMember {
                    id: "user-1".into(),
                    name: "Grace Lin".into(),
                    role: "client".into(),
                    avatar: "/avatars/grace.png".into(),
                },
                TeamMember {
                    id: "worker-2".into(),
                    name: "Tom Haines".into(),
                    role: "labourer".into(),
                    avatar: "/avatars/tom.png".into(),
                },
            ]),
            milestones: None,
            messages: None,
        },
        Project {
            id: "project-2".into(),
            name: "Harbour Homes client portal".into(),
            description: "Customer-facing progress portal for new-build buyers.".into(),
            created_at: at(2024, 3, 5, 12, 0),
            updated_at: at(2024, 3, 5, 12, 0),
            team: Some(vec![TeamMember {
                id: "worker-1".into(),
                name: "Priya Patel".into(),
                role: "labourer".into(),
                avatar: "/avatars/priya.png".into(),
            }]),
            milestones: None,
            messages: None,
        },
    ]
}

pub fn milestones() -> Vec<Milestone> {
    let milestone = |id: &str,
                     project_id: &str,
                     title: &str,
                     due: NaiveDate,
                     status: MilestoneStatus,
                     progress: u8| Milestone {
        id: id.to_string(),
        project_id: project_id.to_string(),
        title: title.to_string(),
        description: format!("{title} sign-off"),
        due_date: due,
        status,
        progress,
        created_at: at(2024, 1, 8, 8, 0),
        updated_at: at(2024, 3, 1, 9, 0),
    };

    vec![
        milestone("milestone-1", "project-1", "Demolition", date(2024, 2, 1), MilestoneStatus::Approved, 100),
        milestone("milestone-2", "project-1", "Structural steel", date(2024, 3, 15), MilestoneStatus::InProgress, 60),
        milestone("milestone-3", "project-1", "First fix", date(2024, 4, 20), MilestoneStatus::Pending, 0),
        milestone("milestone-4", "project-2", "Design approval", date(2024, 3, 20), MilestoneStatus::Pending, 0),
    ]
}

pub fn messages() -> Vec<Message> {
    vec![
        Message {
            id: "msg-1".into(),
            project_id: "project-1".into(),
            sender_id: "user-1".into(),
            sender_name: "Grace Lin".into(),
            sender_avatar: "/avatars/grace.png".into(),
            content: "Steel delivery is confirmed for Monday.".into(),
            timestamp: at(2024, 3, 6, 9, 12),
            is_own: false,
        },
        Message {
            id: "msg-2".into(),
            project_id: "project-1".into(),
            sender_id: "worker-2".into(),
            sender_name: "Tom Haines".into(),
            sender_avatar: "/avatars/tom.png".into(),
            content: "Great, we'll have the crane booked for 8am.".into(),
            timestamp: at(2024, 3, 6, 9, 40),
            is_own: true,
        },
        Message {
            id: "msg-3".into(),
            project_id: "project-2".into(),
            sender_id: "worker-1".into(),
            sender_name: "Priya Patel".into(),
            sender_avatar: "/avatars/priya.png".into(),
            content: "First wireframes are uploaded.".into(),
            timestamp: at(2024, 3, 5, 15, 5),
            is_own: true,
        },
    ]
}

//! Demo catalog loaded at startup: professors, students, the two demo
//! accounts, channels and private chats.

use std::collections::BTreeSet;

use chrono::{Duration, Utc};

use campus_shared::constants::{DEMO_PROFESSOR_EMAIL, DEMO_STUDENT_EMAIL};
use campus_shared::types::{ChannelId, ChatId, ContentId, ContentKind, MessageId, Role, UserId};

use crate::models::{Channel, ContentItem, Message, PrivateChat, User};
use crate::registry::Registry;

const ALGIERS: &str = "جامعة الجزائر 1 بن يوسف بن خدة";
const ORAN: &str = "جامعة وهران 1 أحمد بن بلة";
const USTHB: &str = "جامعة العلوم والتكنولوجيا هواري بومدين (USTHB)";
const KSAR: &str = "جامعة ابن خلدون ملحقة قصر الشلالة";

const SCIENCES: &str = "كلية العلوم";
const MEDICINE: &str = "كلية الطب";
const COMPUTING: &str = "كلية الإعلام الآلي";
const ECONOMICS: &str = "كلية العلوم الاقتصادية و علوم التسيير";

const DUMMY_PDF: &str = "https://www.w3.org/WAI/ER/tests/xhtml/testfiles/resources/pdf/dummy.pdf";
const SAMPLE_MP4: &str = "https://www.learningcontainer.com/wp-content/uploads/2020/05/sample-mp4-file.mp4";

fn picture(n: u32) -> String {
    format!("https://picsum.photos/100/100?random={n}")
}

#[allow(clippy::too_many_arguments)]
fn account(
    id: &str,
    email: &str,
    name: &str,
    pic: u32,
    role: Role,
    university: &str,
    college: &str,
    counter: u64,
) -> User {
    let (stars, balance) = match role {
        Role::Professor => (Some(counter as u32), None),
        Role::Student => (None, Some(counter)),
    };
    User {
        id: UserId::from(id),
        email: email.to_string(),
        name: name.to_string(),
        profile_pic: picture(pic),
        role,
        university: Some(university.to_string()),
        college: Some(college.to_string()),
        stars,
        balance,
        device_token: None,
    }
}

/// Seed professors and students, demo accounts included.
pub fn users() -> Vec<User> {
    vec![
        account("prof1", "prof1@example.com", "أحمد علي", 1, Role::Professor, ALGIERS, SCIENCES, 10),
        account("prof2", "prof2@example.com", "فاطمة الزهراء", 2, Role::Professor, ORAN, MEDICINE, 15),
        account("prof3", "prof3@example.com", "خالد بن طاهر", 10, Role::Professor, USTHB, COMPUTING, 20),
        account("demo_prof", DEMO_PROFESSOR_EMAIL, "بن الطاهر بختة", 98, Role::Professor, KSAR, ECONOMICS, 20),
        account("stud1", "stud1@example.com", "سارة خالد", 3, Role::Student, ALGIERS, SCIENCES, 500),
        account("stud2", "stud2@example.com", "محمد أمين", 4, Role::Student, ORAN, MEDICINE, 750),
        account("stud3", "stud3@example.com", "ليلى مراد", 11, Role::Student, USTHB, COMPUTING, 1000),
        account("demo_stud", DEMO_STUDENT_EMAIL, "حمر العين ربيع", 99, Role::Student, KSAR, ECONOMICS, 2000),
    ]
}

fn message(id: &str, sender: &str, name: &str, text: &str, ago_ms: i64) -> Message {
    Message {
        id: MessageId::from(id),
        sender_id: UserId::from(sender),
        sender_name: name.to_string(),
        text: text.to_string(),
        timestamp: Utc::now() - Duration::milliseconds(ago_ms),
    }
}

fn content(id: &str, kind: ContentKind, url: &str, file_name: Option<&str>, thumbnail: Option<&str>) -> ContentItem {
    ContentItem {
        id: ContentId::from(id),
        kind,
        url: url.to_string(),
        file_name: file_name.map(str::to_string),
        thumbnail: thumbnail.map(str::to_string),
    }
}

fn subscribers(ids: &[&str]) -> BTreeSet<UserId> {
    ids.iter().map(|id| UserId::from(*id)).collect()
}

/// Seed channels.
pub fn channels() -> Vec<Channel> {
    vec![
        Channel {
            id: ChannelId::from("chan1"),
            name: "الرياضيات".into(),
            professor_id: UserId::from("prof1"),
            professor_name: "أحمد علي".into(),
            university: ALGIERS.into(),
            college: SCIENCES.into(),
            content: vec![
                content("cont1", ContentKind::Pdf, DUMMY_PDF, Some("مقدمة في الجبر.pdf"), None),
                content("cont2", ContentKind::Image, "https://picsum.photos/800/600?random=5", None, None),
                content("cont3", ContentKind::Video, SAMPLE_MP4, None, Some("https://picsum.photos/300/200?random=6")),
            ],
            chat_messages: vec![
                message("msg1", "prof1", "أحمد علي", "أهلاً بكم في قناة الرياضيات!", 3_600_000),
                message("msg2", "stud1", "سارة خالد", "شكراً أستاذ.", 1_800_000),
            ],
            google_meet_link: "https://meet.google.com/xxx-yyyy-zzz".into(),
            subscribers: subscribers(&["stud1", "demo_stud"]),
        },
        Channel {
            id: ChannelId::from("chan2"),
            name: "الفيزياء".into(),
            professor_id: UserId::from("prof1"),
            professor_name: "أحمد علي".into(),
            university: ALGIERS.into(),
            college: SCIENCES.into(),
            content: vec![content(
                "cont4",
                ContentKind::Pdf,
                "https://www.africau.edu/images/default/sample.pdf",
                Some("ميكانيكا الكم.pdf"),
                None,
            )],
            chat_messages: vec![message("msg3", "prof1", "أحمد علي", "مرحباً بطلاب الفيزياء.", 7_200_000)],
            google_meet_link: "https://meet.google.com/abc-def-ghi".into(),
            subscribers: BTreeSet::new(),
        },
        Channel {
            id: ChannelId::from("chan3"),
            name: "الطب البشري".into(),
            professor_id: UserId::from("prof2"),
            professor_name: "فاطمة الزهراء".into(),
            university: ORAN.into(),
            college: MEDICINE.into(),
            content: vec![content("cont5", ContentKind::Image, "https://picsum.photos/800/600?random=7", None, None)],
            chat_messages: Vec::new(),
            google_meet_link: "https://meet.google.com/jkl-mno-pqr".into(),
            subscribers: subscribers(&["stud2", "demo_stud"]),
        },
        Channel {
            id: ChannelId::from("chan4"),
            name: "هندسة برمجيات".into(),
            professor_id: UserId::from("prof3"),
            professor_name: "خالد بن طاهر".into(),
            university: USTHB.into(),
            college: COMPUTING.into(),
            content: vec![
                content("cont6", ContentKind::Pdf, DUMMY_PDF, Some("أساسيات هندسة البرمجيات.pdf"), None),
                content("cont7", ContentKind::Video, SAMPLE_MP4, None, Some("https://picsum.photos/300/200?random=12")),
            ],
            chat_messages: vec![message("msg4", "prof3", "خالد بن طاهر", "أهلاً بطلاب هندسة البرمجيات.", 1_200_000)],
            google_meet_link: "https://meet.google.com/stu-vwx-yza".into(),
            subscribers: subscribers(&["stud3"]),
        },
        Channel {
            id: ChannelId::from("chan5"),
            name: "إدارة أعمال".into(),
            professor_id: UserId::from("demo_prof"),
            professor_name: "بن الطاهر بختة".into(),
            university: KSAR.into(),
            college: ECONOMICS.into(),
            content: Vec::new(),
            chat_messages: Vec::new(),
            google_meet_link: "https://meet.google.com/mnb-vfr-cde".into(),
            subscribers: BTreeSet::new(),
        },
    ]
}

/// Seed private chats.
pub fn private_chats() -> Vec<PrivateChat> {
    vec![
        PrivateChat {
            id: ChatId::from("pc1"),
            participants: [UserId::from("prof1"), UserId::from("stud1")],
            messages: vec![
                message("pmsg1", "prof1", "أحمد علي", "كيف حالك يا سارة؟", 1_000_000),
                message("pmsg2", "stud1", "سارة خالد", "بخير، شكراً أستاذ.", 500_000),
            ],
        },
        PrivateChat {
            id: ChatId::from("pc_demo_prof_stud"),
            participants: [UserId::from("demo_prof"), UserId::from("demo_stud")],
            messages: vec![
                message("dpmsg1", "demo_prof", "بن الطاهر بختة", "مرحباً بالطالب التجريبي!", 200_000),
                message("dpmsg2", "demo_stud", "حمر العين ربيع", "مرحباً أستاذ تجريبي.", 100_000),
            ],
        },
    ]
}

impl Registry {
    /// A registry pre-loaded with the demo catalog.
    pub fn seeded() -> Self {
        Self::from_parts(users(), channels(), private_chats())
    }
}

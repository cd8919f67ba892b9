//! Fixed queries against the HyTek meet database
//!
//! Seed times are stored as fractional seconds; the entries query scales them
//! by 100 and rounds to whole centiseconds inside the database. NULL
//! distances and seed times come back as 0.

/// Label of the meet configuration query
pub const MEET_INFO_QUERY: &str = "meet info";

/// Label of the entries query
pub const ENTRIES_QUERY: &str = "entries";

pub const MEET_INFO_SQL: &str = r#"
    SELECT
        TRIM(M.Meet_name1) AS Meet_name,
        M.Meet_start,
        M.Meet_end,
        M.Calc_date,
        TRIM(M.course_order) AS course_order,
        M.EntryEligibility_date
    FROM
        Meet AS M;
"#;

pub const MEET_INFO_COLUMNS: &[&str] = &[
    "Meet_name",
    "Meet_start",
    "Meet_end",
    "Calc_date",
    "course_order",
    "EntryEligibility_date",
];

pub const ENTRIES_SQL: &str = r#"
    SELECT
        TRIM(T.Team_abbr) AS Team_abbr,
        TRIM(A.Last_name) AS Last_name,
        TRIM(A.First_name) AS First_name,
        TRIM(A.Reg_no) AS Reg_no,
        A.Ath_Sex,
        A.Birth_date,
        A.Ath_age,
        E.Event_no,
        E.Ind_rel,
        CInt(IIF(E.Event_dist IS NULL, 0, E.Event_dist)) AS Event_dist,
        E.Event_stroke,
        E.Low_age,
        E.Event_Type,
        EN.ActSeed_course,
        CLng(IIF(EN.ActualSeed_time IS NULL, 0, EN.ActualSeed_time * 100)) AS ActualSeed_time,
        EN.ConvSeed_course,
        CLng(IIF(EN.ConvSeed_time IS NULL, 0, EN.ConvSeed_time * 100)) AS ConvSeed_time,
        EN.Scr_stat,
        EN.Bonus_event,
        TRIM(EN.Pre_exh) AS Pre_exh,
        TRIM(EN.Fin_exh) AS Fin_exh
    FROM
        ((Athlete AS A
        INNER JOIN Team AS T ON A.Team_no = T.Team_no)
        INNER JOIN Entry AS EN ON A.Ath_no = EN.Ath_no)
        INNER JOIN Event AS E ON EN.Event_ptr = E.Event_ptr;
"#;

pub const ENTRIES_COLUMNS: &[&str] = &[
    "Team_abbr",
    "Last_name",
    "First_name",
    "Reg_no",
    "Ath_Sex",
    "Birth_date",
    "Ath_age",
    "Event_no",
    "Ind_rel",
    "Event_dist",
    "Event_stroke",
    "Low_age",
    "Event_Type",
    "ActSeed_course",
    "ActualSeed_time",
    "ConvSeed_course",
    "ConvSeed_time",
    "Scr_stat",
    "Bonus_event",
    "Pre_exh",
    "Fin_exh",
];

use crate::model::Assignments;
use crate::stats::RankHistogram;
use crate::trials::Trial;

fn ordinal(rank: usize) -> String {
    match rank {
        0 => "First".to_owned(),
        1 => "Second".to_owned(),
        2 => "Third".to_owned(),
        3 => "Fourth".to_owned(),
        4 => "Fifth".to_owned(),
        n => format!("#{}", n + 1),
    }
}

/// Share of assigned students at each of the first `reported_ranks` ranks.
pub fn rank_lines(ranks: &RankHistogram, reported_ranks: usize) -> Vec<String> {
    (0..reported_ranks)
        .map(|rank| {
            format!(
                "Percent of students assigned their {} Choice: {}%",
                ordinal(rank),
                ranks.percent(rank)
            )
        })
        .collect()
}

pub fn display_trial(trial: &Trial, reported_ranks: usize) {
    println!(
        "\nTrial {} was successful. Here's the stats:",
        trial.index
    );
    for line in rank_lines(&trial.ranks, reported_ranks) {
        println!("{line}");
    }
}

pub fn display_details(a: &Assignments) {
    let mut trips = a.all_trips();
    trips.sort_by_key(|&t| &a.trip(t).name);
    for t in trips {
        let mut students = a.students_for(t).to_vec();
        students.sort_by_key(|&s| a.student(s).name());
        if !students.is_empty() {
            println!("{}:", a.trip(t).name);
            for s in students {
                print!("  - {}", a.student(s).name());
                if let Some(rank) = a.rank_of(s, t) {
                    print!(" (rank {})", rank + 1);
                }
                println!();
            }
            println!();
        }
    }
}

pub fn display_stats(a: &Assignments, ranks: &RankHistogram, reported_ranks: usize) {
    let students = a.students.len();
    let assigned = a.assigned_students().len();
    println!(
        "Students assigned/unassigned/total: {}/{}/{}",
        assigned,
        students - assigned,
        students
    );
    println!("Final ranking:");
    for (rank, (n, (c, percent))) in ranks
        .counts()
        .iter()
        .zip(ranks.cumulative())
        .enumerate()
        .take(reported_ranks)
    {
        if *n != 0 {
            println!(
                "  - rank {}: {} (cumulative {} - {:.2}%)",
                rank + 1,
                n,
                c,
                percent
            );
        }
    }
    let lower = assigned - ranks.counts().iter().take(reported_ranks).sum::<usize>();
    if lower != 0 {
        println!("  - rank {} or lower: {}", reported_ranks + 1, lower);
    }
}

pub fn display_unassigned(a: &Assignments) {
    let mut students = a.unassigned_students();
    students.sort_by_key(|&s| a.student(s).name());
    if !students.is_empty() {
        println!("Unassigned students:");
        for s in students {
            let student = a.student(s);
            println!("  - {} ({})", student, student.preferences_str());
        }
    }
}

pub fn display_empty(a: &Assignments) {
    let mut trips = a.filter_trips(|t| a.students_for(t).is_empty());
    trips.sort_by_key(|&t| &a.trip(t).name);
    if !trips.is_empty() {
        println!("Empty trips:");
        for t in trips {
            println!("  - {}", a.trip(t).name);
        }
    }
}

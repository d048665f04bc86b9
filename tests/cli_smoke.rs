use predicates::str::{contains, diff};

#[test]
fn summary_fcfs_is_stable() {
    let expected = concat!(
        "Metadata:\n",
        "algorithm: fcfs\n",
        "processes: 3\n",
        "Summary:\n",
        "average waiting time: 3.33\n",
        "average turnaround time: 8.67\n",
        "makespan: 16\n",
        "idle time: 0\n",
        "cpu utilization: 100.00%\n",
        "context switches: 2\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sched-sim");
    cmd.args([
        "run",
        "--algo",
        "fcfs",
        "--processes",
        "P1:0:5,P2:1:3,P3:2:8",
        "--summary",
    ]);
    cmd.assert().success().stdout(diff(expected));
}

#[test]
fn summary_sjf_waits_for_running_job() {
    let expected = concat!(
        "Metadata:\n",
        "algorithm: sjf\n",
        "processes: 3\n",
        "Summary:\n",
        "average waiting time: 4.67\n",
        "average turnaround time: 8.67\n",
        "makespan: 12\n",
        "idle time: 0\n",
        "cpu utilization: 100.00%\n",
        "context switches: 2\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sched-sim");
    cmd.args([
        "run",
        "--algo",
        "sjf",
        "--process",
        "long:0:8",
        "--process",
        "mid:1:3",
        "--process",
        "short:2:1",
        "--format",
        "summary",
    ]);
    cmd.assert().success().stdout(diff(expected));
}

#[test]
fn full_output_round_robin_lists_slices() {
    let expected = concat!(
        "Metadata:\n",
        "algorithm: round-robin\n",
        "quantum: 2\n",
        "processes: 2\n",
        "Timeline:\n",
        "P1 [0-2]\n",
        "P2 [2-4]\n",
        "P1 [4-6]\n",
        "P2 [6-7]\n",
        "P1 [7-8]\n",
        "Results:\n",
        "P2: arrival 1, burst 3, start 2, completion 7, turnaround 6, waiting 3\n",
        "P1: arrival 0, burst 5, start 0, completion 8, turnaround 8, waiting 3\n",
        "Summary:\n",
        "average waiting time: 3.00\n",
        "average turnaround time: 7.00\n",
        "makespan: 8\n",
        "idle time: 0\n",
        "cpu utilization: 100.00%\n",
        "context switches: 4\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sched-sim");
    cmd.args([
        "run",
        "--algo",
        "round-robin",
        "--quantum",
        "2",
        "--process",
        "P1:0:5",
        "--process",
        "P2:1:3",
    ]);
    cmd.assert().success().stdout(diff(expected));
}

#[test]
fn full_output_mlfq_shows_queue_levels() {
    let expected = concat!(
        "Metadata:\n",
        "algorithm: mlfq\n",
        "quantums: 2,4\n",
        "processes: 1\n",
        "Timeline:\n",
        "P1 [0-2] (queue 0)\n",
        "P1 [2-5] (queue 1)\n",
        "Results:\n",
        "P1: arrival 0, burst 5, start 0, completion 5, turnaround 5, waiting 0\n",
        "Summary:\n",
        "average waiting time: 0.00\n",
        "average turnaround time: 5.00\n",
        "makespan: 5\n",
        "idle time: 0\n",
        "cpu utilization: 100.00%\n",
        "context switches: 0\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sched-sim");
    cmd.args([
        "run",
        "--algo",
        "mlfq",
        "--quantums",
        "2,4",
        "--process",
        "P1:0:5:0",
        "--format",
        "human",
    ]);
    cmd.assert().success().stdout(diff(expected));
}

#[test]
fn json_output_uses_display_layer_field_names() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sched-sim");
    cmd.args([
        "run",
        "--algo",
        "fcfs",
        "--process",
        "P1:0:2",
        "--format",
        "json",
    ]);
    cmd.assert()
        .success()
        .stdout(contains("\"averageWaitingTime\": 0.0"))
        .stdout(contains("\"ganttChart\""))
        .stdout(contains("\"processId\": \"P1\""))
        .stdout(contains("\"completionTime\": 2"));
}

#[test]
fn empty_workload_reports_zero_averages() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sched-sim");
    cmd.args(["run", "--algo", "round-robin", "--summary"]);
    cmd.assert()
        .success()
        .stdout(contains("processes: 0\n"))
        .stdout(contains("average waiting time: 0.00\n"));
}

mod broadcast_job;
